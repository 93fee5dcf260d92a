//! Concurrent fan-out over the three sources.

use almanac_core::{
    Aggregate, AggregateQuery, AlmanacError, ProviderResult, Source, SourceFailure, UnifiedResult,
    assemble,
};
use async_trait::async_trait;
use tokio::time::Instant;

use crate::core::{Almanac, tag_err};

impl Almanac {
    /// Fetch one source under retry, per-attempt timeout and the optional deadline.
    ///
    /// Elapsed time covers every attempt and backoff, and is recorded whether
    /// the source ends up succeeding or failing.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "almanac::aggregate::fetch_source",
            skip_all,
            fields(source = %source, provider = provider_name),
        )
    )]
    async fn fetch_source<T, F, Fut>(
        &self,
        source: Source,
        provider_name: &'static str,
        mut call: F,
    ) -> ProviderResult<T>
    where
        F: FnMut() -> Fut,
        Fut: core::future::Future<Output = Result<T, AlmanacError>>,
    {
        let label = source.as_str();
        let timeout = self.cfg.provider_timeout;
        let started = Instant::now();

        let attempts = self.retry.run(label, || {
            Self::provider_call_with_timeout(provider_name, label, timeout, call())
        });
        let outcome = Self::with_request_deadline(self.cfg.request_timeout, label, attempts).await;

        self.stats.record(label, started.elapsed());

        outcome.map_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "almanac::aggregate",
                source = label,
                error = %e,
                "source failed; continuing with remaining sources"
            );
            SourceFailure {
                source,
                error: tag_err(provider_name, e),
            }
        })
    }

    /// Fetch all three sources concurrently and fold them into one result.
    ///
    /// Behavior:
    /// - The three fetches overlap and are all awaited; one failing or stalling
    ///   source never cancels or short-circuits the others.
    /// - A failed source contributes no data and is named in the status message.
    /// - News is capped per publication day when `news_per_day_limit` is set.
    ///
    /// Never fails: every provider outcome is folded into the result's status.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "almanac::aggregate::fetch_all",
            skip(self, query),
            fields(
                keyword = query.keyword(),
                start = %query.range().start(),
                end = %query.range().end(),
            ),
        )
    )]
    pub async fn fetch_all(&self, query: &AggregateQuery) -> UnifiedResult {
        let range = query.range();
        let keyword = query.keyword();
        let sort_news = query.sort_news();
        let (weather_p, astronomy_p, news_p) = (&self.weather, &self.astronomy, &self.news);

        let weather = self.fetch_source(Source::Weather, weather_p.name(), move || {
            weather_p.weather(keyword, range)
        });
        let astronomy = self.fetch_source(Source::Astronomy, astronomy_p.name(), move || {
            astronomy_p.astronomy(range)
        });
        let news = self.fetch_source(Source::News, news_p.name(), move || {
            news_p.news(keyword, range, sort_news)
        });

        let (weather, astronomy, news) = tokio::join!(weather, astronomy, news);

        let news = match self.cfg.news_per_day_limit {
            Some(limit) => news.map(|feed| feed.cap_per_day(limit)),
            None => news,
        };
        assemble(&range, query.sort_date(), weather, astronomy, news)
    }

    /// Validate raw boundary strings, aggregate, and serialize the result.
    ///
    /// # Errors
    /// Returns `InvalidArg` for invalid input, or `Data` if serialization fails.
    pub async fn aggregate_json(
        &self,
        start_date: &str,
        end_date: &str,
        keyword: &str,
        sort_date_by: &str,
        sort_news_by: &str,
    ) -> Result<String, AlmanacError> {
        let query =
            AggregateQuery::parse(start_date, end_date, keyword, sort_date_by, sort_news_by)?;
        self.fetch_all(&query).await.to_json()
    }
}

#[async_trait]
impl Aggregate for Almanac {
    fn name(&self) -> &'static str {
        "Almanac"
    }

    async fn aggregate(&self, query: &AggregateQuery) -> Result<UnifiedResult, AlmanacError> {
        Ok(self.fetch_all(query).await)
    }
}
