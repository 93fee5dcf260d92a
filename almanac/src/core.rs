use std::sync::Arc;
use std::time::Duration;

use almanac_core::{
    AlmanacConfig, AlmanacError, AstronomyProvider, CacheConfig, NewsProvider, ProviderStatistic,
    RetryConfig, Source, StatisticsRecorder, WeatherProvider,
};
use almanac_middleware::{AggregatorBuilder, CachingAggregator};

use crate::retry::RetryPolicy;

/// Orchestrator that fans a query out to the weather, astronomy and news providers.
pub struct Almanac {
    pub(crate) weather: Arc<dyn WeatherProvider>,
    pub(crate) astronomy: Arc<dyn AstronomyProvider>,
    pub(crate) news: Arc<dyn NewsProvider>,
    pub(crate) cfg: AlmanacConfig,
    pub(crate) retry: RetryPolicy,
    pub(crate) stats: Arc<StatisticsRecorder>,
}

/// Builder for constructing an `Almanac` orchestrator with custom configuration.
pub struct AlmanacBuilder {
    weather: Option<Arc<dyn WeatherProvider>>,
    astronomy: Option<Arc<dyn AstronomyProvider>>,
    news: Option<Arc<dyn NewsProvider>>,
    cfg: AlmanacConfig,
    stats: Option<Arc<StatisticsRecorder>>,
}

impl Default for AlmanacBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AlmanacBuilder {
    /// Create a new builder with default configuration and no providers.
    ///
    /// All three providers must be registered before [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self {
            weather: None,
            astronomy: None,
            news: None,
            cfg: AlmanacConfig::default(),
            stats: None,
        }
    }

    /// Register the weather provider.
    #[must_use]
    pub fn with_weather(mut self, p: Arc<dyn WeatherProvider>) -> Self {
        self.weather = Some(p);
        self
    }

    /// Register the astronomy provider.
    #[must_use]
    pub fn with_astronomy(mut self, p: Arc<dyn AstronomyProvider>) -> Self {
        self.astronomy = Some(p);
        self
    }

    /// Register the news provider.
    #[must_use]
    pub fn with_news(mut self, p: Arc<dyn NewsProvider>) -> Self {
        self.news = Some(p);
        self
    }

    /// Register one value that serves all three roles.
    #[must_use]
    pub fn with_providers<P>(self, p: Arc<P>) -> Self
    where
        P: WeatherProvider + AstronomyProvider + NewsProvider + 'static,
    {
        self.with_weather(p.clone())
            .with_astronomy(p.clone())
            .with_news(p)
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: AlmanacConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the retry policy applied to every provider call.
    #[must_use]
    pub const fn retry(mut self, cfg: RetryConfig) -> Self {
        self.cfg.retry = cfg;
        self
    }

    /// Set the timeout for a single provider attempt.
    ///
    /// An attempt that runs out of time counts as a transient failure and is retried.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Bound each source's whole retry loop within one request.
    ///
    /// When exceeded, that source fails with `RequestTimeout`; the other
    /// sources are unaffected.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Keep at most `limit` news articles per day; `None` keeps all.
    #[must_use]
    pub const fn news_per_day_limit(mut self, limit: Option<usize>) -> Self {
        self.cfg.news_per_day_limit = limit;
        self
    }

    /// Share a statistics recorder with other orchestrators in the process.
    #[must_use]
    pub fn statistics(mut self, stats: Arc<StatisticsRecorder>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Build the `Almanac` orchestrator.
    ///
    /// # Errors
    /// Returns `MissingProvider` naming the first role with no registered provider.
    pub fn build(self) -> Result<Almanac, AlmanacError> {
        let weather = self.weather.ok_or(AlmanacError::MissingProvider {
            kind: Source::Weather,
        })?;
        let astronomy = self.astronomy.ok_or(AlmanacError::MissingProvider {
            kind: Source::Astronomy,
        })?;
        let news = self.news.ok_or(AlmanacError::MissingProvider {
            kind: Source::News,
        })?;
        Ok(Almanac {
            weather,
            astronomy,
            news,
            retry: RetryPolicy::new(self.cfg.retry),
            cfg: self.cfg,
            stats: self.stats.unwrap_or_default(),
        })
    }
}

/// Attach the provider name to errors that do not already identify their origin.
///
/// Transient and timeout classes pass through untouched so retry classification
/// is preserved.
pub fn tag_err(provider: &str, e: AlmanacError) -> AlmanacError {
    match e {
        e @ (AlmanacError::Network { .. }
        | AlmanacError::ProviderTimeout { .. }
        | AlmanacError::RateLimited { .. }
        | AlmanacError::NotFound { .. }
        | AlmanacError::Connector { .. }
        | AlmanacError::RequestTimeout { .. }
        | AlmanacError::MissingProvider { .. }) => e,
        other => AlmanacError::Connector {
            connector: provider.to_string(),
            msg: other.to_string(),
        },
    }
}

impl Almanac {
    /// Start building a new `Almanac` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use almanac::Almanac;
    /// use almanac_mock::MockProviders;
    ///
    /// let almanac = Almanac::builder()
    ///     .with_providers(Arc::new(MockProviders::new()))
    ///     .provider_timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> AlmanacBuilder {
        AlmanacBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AlmanacConfig {
        &self.cfg
    }

    /// Latency summaries for every source seen so far.
    #[must_use]
    pub fn statistics(&self) -> Vec<ProviderStatistic> {
        self.stats.snapshot()
    }

    /// The recorder this orchestrator writes to.
    #[must_use]
    pub fn statistics_recorder(&self) -> Arc<StatisticsRecorder> {
        Arc::clone(&self.stats)
    }

    /// Start a middleware stack with this orchestrator as the raw aggregator.
    #[must_use]
    pub fn layered(self) -> AggregatorBuilder {
        AggregatorBuilder::new(Arc::new(self))
    }

    /// Put this orchestrator behind a cache-aside layer.
    #[must_use]
    pub fn cached(self, cfg: &CacheConfig) -> CachingAggregator {
        CachingAggregator::new(Arc::new(self), cfg)
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "almanac::core::provider_call_with_timeout",
            skip_all,
            fields(
                provider = provider_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        provider_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, AlmanacError>
    where
        Fut: core::future::Future<Output = Result<T, AlmanacError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(AlmanacError::provider_timeout(provider_name, capability)))
    }

    /// Bound `fut` by an optional deadline, mapping expiry to `RequestTimeout`.
    pub(crate) async fn with_request_deadline<T, Fut>(
        deadline: Option<Duration>,
        capability: &'static str,
        fut: Fut,
    ) -> Result<T, AlmanacError>
    where
        Fut: core::future::Future<Output = Result<T, AlmanacError>>,
    {
        match deadline {
            Some(d) => (tokio::time::timeout(d, fut).await)
                .unwrap_or_else(|_| Err(AlmanacError::request_timeout(capability))),
            None => fut.await,
        }
    }
}
