//! Date-keyed merge of the three source datasets.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
    AggregatedRecord, Article, AstronomyEntry, DateRange, NewsFeed, SortDirection, Temperature,
    WeatherEntry,
};

/// Merge the three datasets into one record per day of `range`.
///
/// Behavior:
/// - Records are generated for every day from `range.start()` to `range.end()`.
/// - Weather and astronomy: the first entry for a day wins; later duplicates are ignored.
/// - News: every article published on the day (time of day ignored), in source order.
/// - Entries dated outside the range are dropped.
/// - `SortDirection::Desc` reverses the final order.
///
/// Pure and deterministic; no I/O.
#[must_use]
pub fn merge_days(
    range: &DateRange,
    weather: &[WeatherEntry],
    astronomy: &[AstronomyEntry],
    news: &NewsFeed,
    sort: SortDirection,
) -> Vec<AggregatedRecord> {
    let mut weather_by_day: HashMap<NaiveDate, &Temperature> = HashMap::new();
    for w in weather {
        weather_by_day.entry(w.date).or_insert(&w.temperature);
    }

    let mut astronomy_by_day: HashMap<NaiveDate, &AstronomyEntry> = HashMap::new();
    for a in astronomy {
        astronomy_by_day.entry(a.date).or_insert(a);
    }

    let mut news_by_day: HashMap<NaiveDate, Vec<&Article>> = HashMap::new();
    for article in &news.articles {
        news_by_day
            .entry(article.published_on())
            .or_default()
            .push(article);
    }

    let mut out: Vec<AggregatedRecord> = Vec::with_capacity(range.len_days());
    for day in range.days() {
        out.push(AggregatedRecord {
            date: day,
            weather: weather_by_day.get(&day).map(|t| (*t).clone()),
            astronomy_picture_of_the_day: astronomy_by_day.get(&day).map(|a| (*a).clone()),
            news: NewsFeed::new(
                news_by_day
                    .get(&day)
                    .map(|v| v.iter().map(|a| (*a).clone()).collect())
                    .unwrap_or_default(),
            ),
        });
    }

    if sort == SortDirection::Desc {
        out.reverse();
    }
    out
}
