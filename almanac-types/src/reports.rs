use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AlmanacError, AstronomyEntry, NewsFeed, Source, Temperature};

/// Everything known about one calendar day after merging all sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRecord {
    /// The day this record describes.
    pub date: NaiveDate,
    /// Temperature snapshot, absent when the weather source had nothing for the day.
    pub weather: Option<Temperature>,
    /// Astronomy picture, absent when none was published for the day.
    pub astronomy_picture_of_the_day: Option<AstronomyEntry>,
    /// News published on the day; possibly empty, never absent.
    pub news: NewsFeed,
}

impl AggregatedRecord {
    /// A record with no data from any source.
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            weather: None,
            astronomy_picture_of_the_day: None,
            news: NewsFeed::default(),
        }
    }

    /// True when no source contributed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weather.is_none()
            && self.astronomy_picture_of_the_day.is_none()
            && self.news.articles.is_empty()
    }
}

/// Overall classification of an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Every source responded.
    Success,
    /// Some, but not all, sources failed.
    PartialFailure,
    /// Every source failed; the payload is an empty per-day skeleton.
    Failure,
}

/// A failure isolated to one source, carried as data rather than raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    /// The source that failed.
    pub source: Source,
    /// The last error observed for it.
    pub error: AlmanacError,
}

/// Outcome of one provider fetch, tagged with the source on failure.
pub type ProviderResult<T> = Result<T, SourceFailure>;

/// Structured response for one aggregation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResult {
    /// Overall classification.
    pub status: Status,
    /// Human-readable summary naming any failed sources.
    pub message: String,
    /// Sources that failed, in fan-out order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_sources: Vec<Source>,
    /// One record per day of the requested range.
    pub data: Vec<AggregatedRecord>,
}

impl UnifiedResult {
    /// Serialize for the boundary layer.
    ///
    /// # Errors
    /// Returns `Data` if serialization fails.
    pub fn to_json(&self) -> Result<String, AlmanacError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed variant of [`to_json`](Self::to_json).
    ///
    /// # Errors
    /// Returns `Data` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, AlmanacError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Latency summary for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatistic {
    /// Provider name the samples were recorded under.
    pub api_name: String,
    /// Number of recorded requests.
    pub total_requests: u64,
    /// Requests faster than 100ms.
    pub fast_requests: u64,
    /// Requests between 100ms and 200ms inclusive.
    pub average_requests: u64,
    /// Requests slower than 200ms.
    pub slow_requests: u64,
    /// Arithmetic mean latency in milliseconds; 0 without samples.
    pub average_response_time: f64,
}
