use almanac_core::{Temperature, WeatherEntry};

use super::day;

fn entry(y: i32, m: u32, d: u32, t: [f64; 6]) -> WeatherEntry {
    WeatherEntry {
        date: day(y, m, d),
        temperature: Temperature {
            min: t[0],
            max: t[1],
            morning: t[2],
            afternoon: t[3],
            evening: t[4],
            night: t[5],
        },
    }
}

/// Daily snapshots for a known location, matched case-insensitively.
pub fn by_city(city: &str) -> Vec<WeatherEntry> {
    match city.to_ascii_lowercase().as_str() {
        "mars" => vec![WeatherEntry {
            date: day(2024, 1, 2),
            temperature: Temperature::min_max(10.0, 25.0),
        }],
        "london" => vec![
            entry(2024, 1, 1, [3.1, 8.4, 4.0, 7.9, 6.2, 3.5]),
            entry(2024, 1, 2, [2.4, 7.0, 3.1, 6.8, 5.0, 2.9]),
            entry(2024, 1, 3, [4.0, 9.2, 4.8, 9.0, 7.1, 4.4]),
            entry(2024, 1, 4, [5.2, 10.1, 6.0, 9.8, 8.0, 5.6]),
            entry(2024, 1, 5, [1.9, 6.3, 2.5, 6.0, 4.1, 2.2]),
        ],
        "lisbon" => vec![
            entry(2024, 1, 1, [9.8, 15.6, 11.0, 15.1, 13.2, 10.4]),
            entry(2024, 1, 2, [10.1, 16.0, 11.4, 15.8, 13.9, 10.9]),
            entry(2024, 1, 3, [8.7, 14.2, 9.9, 13.8, 12.0, 9.1]),
        ],
        _ => Vec::new(),
    }
}
