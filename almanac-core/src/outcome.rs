//! Classification of per-source outcomes into a single `UnifiedResult`.

use crate::merge::merge_days;
use crate::{
    AstronomyEntry, DateRange, NewsFeed, ProviderResult, SortDirection, Source, SourceFailure,
    Status, UnifiedResult, WeatherEntry,
};

/// Map the list of failed sources to an overall status and message.
///
/// Rules:
/// - No failures → `Success`.
/// - Some but not all sources failed → `PartialFailure`, naming each failed source.
/// - Every source failed → `Failure`.
#[must_use]
pub fn classify(failures: &[SourceFailure]) -> (Status, String) {
    let names: Vec<&'static str> = failures.iter().map(|f| f.source.as_str()).collect();
    match names.len() {
        0 => (
            Status::Success,
            "Data aggregated successfully from all sources.".to_string(),
        ),
        n if n < Source::ALL.len() => (
            Status::PartialFailure,
            format!(
                "Partial failure: could not fetch data from {}.",
                names.join(", ")
            ),
        ),
        _ => (
            Status::Failure,
            format!(
                "Aggregation could not be completed: all sources failed ({}).",
                names.join(", ")
            ),
        ),
    }
}

/// Fold three per-source outcomes into a merged, classified result.
///
/// Failed sources contribute empty data to the merge, so the result always
/// carries one record per day of `range`.
#[must_use]
pub fn assemble(
    range: &DateRange,
    sort: SortDirection,
    weather: ProviderResult<Vec<WeatherEntry>>,
    astronomy: ProviderResult<Vec<AstronomyEntry>>,
    news: ProviderResult<NewsFeed>,
) -> UnifiedResult {
    let mut failures: Vec<SourceFailure> = Vec::new();
    let weather = weather.unwrap_or_else(|f| {
        failures.push(f);
        Vec::new()
    });
    let astronomy = astronomy.unwrap_or_else(|f| {
        failures.push(f);
        Vec::new()
    });
    let news = news.unwrap_or_else(|f| {
        failures.push(f);
        NewsFeed::default()
    });

    let data = merge_days(range, &weather, &astronomy, &news, sort);
    let (status, message) = classify(&failures);
    UnifiedResult {
        status,
        message,
        failed_sources: failures.iter().map(|f| f.source).collect(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlmanacError;

    fn failed(source: Source) -> SourceFailure {
        SourceFailure {
            source,
            error: AlmanacError::network(source.as_str(), "down"),
        }
    }

    #[test]
    fn no_failures_is_success() {
        let (status, _) = classify(&[]);
        assert_eq!(status, Status::Success);
    }

    #[test]
    fn one_or_two_failures_is_partial_and_names_sources() {
        let (status, msg) = classify(&[failed(Source::News)]);
        assert_eq!(status, Status::PartialFailure);
        assert!(msg.contains("news"));

        let (status, msg) = classify(&[failed(Source::Weather), failed(Source::Astronomy)]);
        assert_eq!(status, Status::PartialFailure);
        assert!(msg.contains("weather") && msg.contains("astronomy"));
        assert!(!msg.contains("news"));
    }

    #[test]
    fn all_failures_is_failure() {
        let all: Vec<_> = Source::ALL.into_iter().map(failed).collect();
        let (status, msg) = classify(&all);
        assert_eq!(status, Status::Failure);
        assert!(msg.contains("could not be completed"));
    }
}
