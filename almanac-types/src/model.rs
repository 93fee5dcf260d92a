//! Provider-shaped datasets consumed by the merge step.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Temperature statistics for one day, in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Temperature {
    /// Daily minimum.
    pub min: f64,
    /// Daily maximum.
    pub max: f64,
    /// Morning reading.
    #[serde(default)]
    pub morning: f64,
    /// Afternoon reading.
    #[serde(default)]
    pub afternoon: f64,
    /// Evening reading.
    #[serde(default)]
    pub evening: f64,
    /// Night reading.
    #[serde(default)]
    pub night: f64,
}

impl Temperature {
    /// Snapshot with only the daily extremes populated.
    #[must_use]
    pub fn min_max(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }
}

/// One weather observation as returned by a weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEntry {
    /// Calendar day the snapshot describes.
    pub date: NaiveDate,
    /// Temperature statistics for that day.
    pub temperature: Temperature,
}

/// Astronomy picture of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstronomyEntry {
    /// Image credit, when the picture is not public domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Calendar day of publication (`yyyy-MM-dd` on the wire).
    pub date: NaiveDate,
    /// Accompanying explanation text.
    pub explanation: String,
    /// Media type, typically `image` or `video`.
    pub media_type: String,
    /// Title of the entry.
    pub title: String,
    /// Location of the media.
    pub url: String,
}

/// A single news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Byline, when the provider knows it.
    #[serde(default)]
    pub author: Option<String>,
    /// Headline.
    pub title: String,
    /// Short summary.
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the article.
    pub url: String,
    /// Publication instant.
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// Calendar day of publication, ignoring time of day.
    #[must_use]
    pub fn published_on(&self) -> NaiveDate {
        self.published_at.date_naive()
    }
}

/// A list of news articles; the container itself is never absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewsFeed {
    /// Articles in provider order.
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl NewsFeed {
    /// Wrap a list of articles.
    #[must_use]
    pub const fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// Keep at most `limit` articles per publication day, preserving order.
    #[must_use]
    pub fn cap_per_day(self, limit: usize) -> Self {
        let mut seen: std::collections::HashMap<NaiveDate, usize> =
            std::collections::HashMap::new();
        let articles = self
            .articles
            .into_iter()
            .filter(|a| {
                let n = seen.entry(a.published_on()).or_insert(0);
                *n += 1;
                *n <= limit
            })
            .collect();
        Self { articles }
    }
}
