#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use almanac_core::{
    Aggregate, AggregateQuery, AlmanacError, AstronomyProvider, NewsProvider, Source,
    SourceFailure, UnifiedResult, WeatherProvider, assemble,
};
use almanac_mock::MockProviders;
use async_trait::async_trait;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Fixtures,
    AllSourcesFail,
    Error,
}

/// Inner aggregator backed by the fixture providers that counts its invocations.
pub struct CountingAggregator {
    providers: MockProviders,
    calls: Arc<AtomicUsize>,
    delay: Duration,
    mode: Mode,
}

impl CountingAggregator {
    pub fn new(calls: Arc<AtomicUsize>) -> Self {
        Self {
            providers: MockProviders::new(),
            calls,
            delay: Duration::ZERO,
            mode: Mode::Fixtures,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    fn tag(source: Source) -> impl FnOnce(AlmanacError) -> SourceFailure {
        move |error| SourceFailure { source, error }
    }
}

#[async_trait]
impl Aggregate for CountingAggregator {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn aggregate(&self, query: &AggregateQuery) -> Result<UnifiedResult, AlmanacError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let range = query.range();
        match self.mode {
            Mode::Error => Err(AlmanacError::Other("inner exploded".into())),
            Mode::AllSourcesFail => Ok(assemble(
                &range,
                query.sort_date(),
                Err(Self::tag(Source::Weather)(AlmanacError::network("w", "down"))),
                Err(Self::tag(Source::Astronomy)(AlmanacError::network("a", "down"))),
                Err(Self::tag(Source::News)(AlmanacError::network("n", "down"))),
            )),
            Mode::Fixtures => {
                let weather = self
                    .providers
                    .weather(query.keyword(), range)
                    .await
                    .map_err(Self::tag(Source::Weather));
                let astronomy = self
                    .providers
                    .astronomy(range)
                    .await
                    .map_err(Self::tag(Source::Astronomy));
                let news = self
                    .providers
                    .news(query.keyword(), range, query.sort_news())
                    .await
                    .map_err(Self::tag(Source::News));
                Ok(assemble(&range, query.sort_date(), weather, astronomy, news))
            }
        }
    }
}

pub fn counting(calls: &Arc<AtomicUsize>) -> CountingAggregator {
    CountingAggregator::new(Arc::clone(calls))
}

pub fn query(keyword: &str) -> AggregateQuery {
    AggregateQuery::parse("2024-01-01", "2024-01-03", keyword, "asc", "publishedAt").unwrap()
}
