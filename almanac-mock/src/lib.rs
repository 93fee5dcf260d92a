use std::time::Duration;

use almanac_core::{
    AlmanacError, AstronomyEntry, AstronomyProvider, DateRange, NewsFeed, NewsProvider, NewsSort,
    WeatherEntry, WeatherProvider,
};
use async_trait::async_trait;

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProviders, MockBehavior};

/// Keyword that makes the keyword-driven providers fail with a network error.
pub const FAIL_KEYWORD: &str = "FAIL";
/// Keyword that makes the keyword-driven providers stall before answering.
pub const SLOW_KEYWORD: &str = "TIMEOUT";
/// How long [`SLOW_KEYWORD`] stalls.
pub const SLOW_DELAY: Duration = Duration::from_millis(200);

/// Mock providers for CI-safe examples. Serves deterministic data from static fixtures.
///
/// One value implements all three provider roles. Results are filtered to the
/// requested range the way a real provider would.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProviders;

impl MockProviders {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_stall(keyword: &str, capability: &'static str) -> Result<(), AlmanacError> {
        match keyword {
            FAIL_KEYWORD => Err(AlmanacError::network(
                "almanac-mock",
                format!("forced failure: {capability}"),
            )),
            SLOW_KEYWORD => {
                tokio::time::sleep(SLOW_DELAY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl WeatherProvider for MockProviders {
    async fn weather(
        &self,
        keyword: &str,
        range: DateRange,
    ) -> Result<Vec<WeatherEntry>, AlmanacError> {
        Self::maybe_fail_or_stall(keyword, "weather").await?;
        Ok(fixtures::weather::by_city(keyword)
            .into_iter()
            .filter(|w| range.contains(w.date))
            .collect())
    }
}

#[async_trait]
impl AstronomyProvider for MockProviders {
    async fn astronomy(&self, range: DateRange) -> Result<Vec<AstronomyEntry>, AlmanacError> {
        Ok(fixtures::astronomy::catalog()
            .into_iter()
            .filter(|a| range.contains(a.date))
            .collect())
    }
}

#[async_trait]
impl NewsProvider for MockProviders {
    async fn news(
        &self,
        keyword: &str,
        range: DateRange,
        sort: NewsSort,
    ) -> Result<NewsFeed, AlmanacError> {
        Self::maybe_fail_or_stall(keyword, "news").await?;
        Ok(NewsFeed::new(
            fixtures::news::by_keyword(keyword, sort)
                .into_iter()
                .filter(|a| range.contains(a.published_on()))
                .collect(),
        ))
    }
}
