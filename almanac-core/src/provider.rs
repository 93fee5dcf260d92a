use async_trait::async_trait;

use crate::{AlmanacError, AstronomyEntry, DateRange, NewsFeed, NewsSort, WeatherEntry};

/// Focused role trait for clients that provide daily weather snapshots.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Human-readable provider name used to tag errors.
    fn name(&self) -> &'static str {
        "weather"
    }

    /// Fetch one entry per available day for the location named by `keyword`.
    async fn weather(
        &self,
        keyword: &str,
        range: DateRange,
    ) -> Result<Vec<WeatherEntry>, AlmanacError>;
}

/// Focused role trait for clients that provide astronomy pictures of the day.
#[async_trait]
pub trait AstronomyProvider: Send + Sync {
    /// Human-readable provider name used to tag errors.
    fn name(&self) -> &'static str {
        "astronomy"
    }

    /// Fetch the pictures published within `range`.
    async fn astronomy(&self, range: DateRange) -> Result<Vec<AstronomyEntry>, AlmanacError>;
}

/// Focused role trait for clients that provide news articles.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Human-readable provider name used to tag errors.
    fn name(&self) -> &'static str {
        "news"
    }

    /// Fetch articles matching `keyword` published within `range`, ordered by `sort`.
    async fn news(
        &self,
        keyword: &str,
        range: DateRange,
        sort: NewsSort,
    ) -> Result<NewsFeed, AlmanacError>;
}
