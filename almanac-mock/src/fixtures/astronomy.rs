use almanac_core::AstronomyEntry;

use super::day;

fn picture(d: u32, title: &str, media_type: &str, copyright: Option<&str>) -> AstronomyEntry {
    AstronomyEntry {
        copyright: copyright.map(str::to_string),
        date: day(2024, 1, d),
        explanation: format!("Explanation for {title}."),
        media_type: media_type.to_string(),
        title: title.to_string(),
        url: format!("https://apod.example/2024-01-{d:02}.jpg"),
    }
}

/// The full picture catalog in publication order.
pub fn catalog() -> Vec<AstronomyEntry> {
    vec![
        picture(2, "Test", "image", None),
        picture(3, "Orion in Red and Blue", "image", Some("Jane Stargazer")),
        picture(4, "A Solar Prominence Eruption", "video", None),
        picture(5, "The Pleiades over Snowy Peaks", "image", Some("K. Observer")),
    ]
}
