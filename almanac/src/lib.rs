//! Almanac aggregates weather, astronomy and news data for a date range.
//!
//! Overview
//! - Fans each query out to three independent providers concurrently.
//! - Wraps every provider call in a per-attempt timeout and an exponential
//!   backoff retry for transient failures (2s, 4s, 8s by default).
//! - Merges the three datasets into one record per calendar day.
//! - Records per-source latency statistics, on success and failure alike.
//! - Optionally fronts the orchestrator with a cache-aside layer that
//!   de-duplicates concurrent identical misses.
//!
//! Key behaviors and trade-offs
//! - Failure isolation: a failing source yields `partial_failure` (or
//!   `failure` when all three fail) instead of an error. Callers always get a
//!   structured result once the input validates.
//! - Full join: the slowest source bounds the request latency. Use
//!   `provider_timeout` and `request_timeout` to cap it.
//! - Caching: results are stored for a fixed lifetime and dropped early when
//!   idle. Total failures are never stored, so an outage does not pin an
//!   empty result in the cache.
//!
//! Examples
//! Building an orchestrator and putting it behind the cache:
//! ```rust,ignore
//! use std::sync::Arc;
//! use almanac::{Almanac, CacheConfig};
//!
//! let almanac = Almanac::builder()
//!     .with_weather(Arc::new(OpenWeather::new(key)))
//!     .with_astronomy(Arc::new(Apod::new(key)))
//!     .with_news(Arc::new(NewsApi::new(key)))
//!     .provider_timeout(std::time::Duration::from_secs(5))
//!     .build()?;
//!
//! let cached = almanac.cached(&CacheConfig::default());
//! let result = cached
//!     .aggregate_raw("2024-01-01", "2024-01-03", "mars", "asc", "publishedAt")
//!     .await?;
//! println!("{}", result.to_json()?);
//! ```
//!
//! See `almanac/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

mod aggregate;
pub(crate) mod core;
mod retry;

pub use core::{Almanac, AlmanacBuilder, tag_err};
pub use retry::RetryPolicy;

pub use almanac_middleware::{AggregatorBuilder, CacheMiddleware, CachingAggregator};

// Re-export core types for convenience
pub use almanac_core::{
    Aggregate,
    AggregateQuery,
    AggregatedRecord,
    // Configuration
    AlmanacConfig,
    AlmanacError,
    Article,
    AstronomyEntry,
    // Provider contracts
    AstronomyProvider,
    CacheConfig,
    DateRange,
    Middleware,
    NewsFeed,
    NewsProvider,
    NewsSort,
    ProviderStatistic,
    QueryKey,
    RetryConfig,
    SortDirection,
    Source,
    StatisticsRecorder,
    Status,
    Temperature,
    UnifiedResult,
    WeatherEntry,
    WeatherProvider,
};
