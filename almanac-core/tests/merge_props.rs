use almanac_core::{
    AggregatedRecord, Article, AstronomyEntry, DateRange, NewsFeed, SortDirection, Temperature,
    WeatherEntry, merge_days,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn weather_on(offset: i64, max: f64) -> WeatherEntry {
    WeatherEntry {
        date: base() + Duration::days(offset),
        temperature: Temperature::min_max(max - 10.0, max),
    }
}

fn picture_on(offset: i64) -> AstronomyEntry {
    AstronomyEntry {
        copyright: None,
        date: base() + Duration::days(offset),
        explanation: String::new(),
        media_type: "image".into(),
        title: format!("pic-{offset}"),
        url: String::new(),
    }
}

fn article_on(offset: i64, hour: u32) -> Article {
    let day = base() + Duration::days(offset);
    let at = Utc
        .from_utc_datetime(&day.and_hms_opt(hour, 0, 0).unwrap());
    Article {
        author: None,
        title: format!("a-{offset}-{hour}"),
        description: None,
        url: String::new(),
        published_at: at,
    }
}

proptest! {
    #[test]
    fn one_record_per_day_in_order(
        start in 0i64..400,
        len in 0i64..60,
        weather in proptest::collection::vec((-5i64..70, -20.0f64..40.0), 0..40),
        pictures in proptest::collection::vec(-5i64..70, 0..40),
        articles in proptest::collection::vec((-5i64..70, 0u32..24), 0..60),
        desc in any::<bool>(),
    ) {
        let s = base() + Duration::days(start);
        let e = s + Duration::days(len);
        let range = DateRange::new(s, e).unwrap();
        let weather: Vec<_> = weather.into_iter().map(|(o, m)| weather_on(start + o, m)).collect();
        let pictures: Vec<_> = pictures.into_iter().map(|o| picture_on(start + o)).collect();
        let feed = NewsFeed::new(articles.into_iter().map(|(o, h)| article_on(start + o, h)).collect());
        let sort = if desc { SortDirection::Desc } else { SortDirection::Asc };

        let out = merge_days(&range, &weather, &pictures, &feed, sort);

        prop_assert_eq!(out.len() as i64, len + 1);
        prop_assert!(out.iter().all(|r| range.contains(r.date)));
        for pair in out.windows(2) {
            if desc {
                prop_assert!(pair[0].date > pair[1].date);
            } else {
                prop_assert!(pair[0].date < pair[1].date);
            }
        }

        for record in &out {
            let first_weather = weather.iter().find(|w| w.date == record.date).map(|w| &w.temperature);
            prop_assert_eq!(record.weather.as_ref(), first_weather);
            let first_pic = pictures.iter().find(|p| p.date == record.date);
            prop_assert_eq!(record.astronomy_picture_of_the_day.as_ref(), first_pic);
            let expected: Vec<&Article> = feed
                .articles
                .iter()
                .filter(|a| a.published_on() == record.date)
                .collect();
            let got: Vec<&Article> = record.news.articles.iter().collect();
            prop_assert_eq!(got, expected);
        }
    }

    #[test]
    fn desc_is_reverse_of_asc(start in 0i64..400, len in 0i64..30) {
        let s = base() + Duration::days(start);
        let range = DateRange::new(s, s + Duration::days(len)).unwrap();
        let weather = vec![weather_on(start, 20.0)];
        let asc = merge_days(&range, &weather, &[], &NewsFeed::default(), SortDirection::Asc);
        let mut desc = merge_days(&range, &weather, &[], &NewsFeed::default(), SortDirection::Desc);
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }
}

#[test]
fn empty_inputs_still_produce_every_day() {
    let range = DateRange::parse("2024-02-27", "2024-03-01").unwrap();
    let out = merge_days(&range, &[], &[], &NewsFeed::default(), SortDirection::Asc);
    let dates: Vec<String> = out.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(
        dates,
        vec!["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]
    );
    assert!(out.iter().all(AggregatedRecord::is_empty));
}

#[test]
fn three_day_example_lands_data_on_the_middle_day() {
    let range = DateRange::parse("2024-01-01", "2024-01-03").unwrap();
    let weather = vec![WeatherEntry {
        date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        temperature: Temperature::min_max(10.0, 25.0),
    }];
    let pictures = vec![AstronomyEntry {
        title: "Test".into(),
        ..picture_on(1)
    }];
    let feed = NewsFeed::new(vec![article_on(1, 10)]);

    let out = merge_days(&range, &weather, &pictures, &feed, SortDirection::Asc);
    assert_eq!(out.len(), 3);
    assert!(out[0].is_empty());
    assert!(out[2].is_empty());
    let mid = &out[1];
    assert_eq!(mid.date.to_string(), "2024-01-02");
    assert_eq!(mid.weather.as_ref().unwrap().min, 10.0);
    assert_eq!(mid.weather.as_ref().unwrap().max, 25.0);
    assert_eq!(
        mid.astronomy_picture_of_the_day.as_ref().unwrap().title,
        "Test"
    );
    assert_eq!(mid.news.articles.len(), 1);
}
