//! Configuration types shared across the orchestrator and its middleware.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Exponential backoff configuration for retrying transient provider failures.
///
/// The delay before retry `n` (1-based) is `base_delay_ms * factor^n`, capped at
/// `max_delay_ms`, plus up to `jitter_percent` random extra. The defaults yield
/// the 2s, 4s, 8s schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first failure; 0 disables retrying.
    pub max_retries: u32,
    /// Base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Exponential factor applied per attempt (>= 1).
    pub factor: u32,
    /// Upper bound for a single delay in milliseconds.
    pub max_delay_ms: u64,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1_000,
            factor: 2,
            max_delay_ms: 30_000,
            jitter_percent: 0,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Un-jittered delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let growth = u64::from(self.factor.max(1)).saturating_pow(attempt);
        let ms = self
            .base_delay_ms
            .saturating_mul(growth)
            .min(self.max_delay_ms);
        Duration::from_millis(ms)
    }
}

/// Global configuration for the `Almanac` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlmanacConfig {
    /// Retry policy wrapped around every provider call.
    pub retry: RetryConfig,
    /// Timeout for a single provider attempt; elapsing counts as a transient failure.
    pub provider_timeout: Duration,
    /// Optional bound on one source's whole retry loop within a request.
    pub request_timeout: Option<Duration>,
    /// Keep at most this many news articles per publication day; `None` keeps all.
    pub news_per_day_limit: Option<usize>,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            news_per_day_limit: Some(3),
        }
    }
}

/// Cache-aside configuration.
///
/// An entry expires `absolute_ttl_ms` after it was written or `idle_ttl_ms`
/// after it was last read, whichever comes first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Fixed lifetime from write time in milliseconds; 0 disables caching.
    pub absolute_ttl_ms: u64,
    /// Sliding idle window in milliseconds; 0 disables the idle bound.
    pub idle_ttl_ms: u64,
    /// Maximum number of cached results.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            absolute_ttl_ms: 300_000,
            idle_ttl_ms: 120_000,
            max_entries: 1024,
        }
    }
}

impl CacheConfig {
    /// Absolute lifetime, or `None` when caching is disabled.
    #[must_use]
    pub const fn absolute_ttl(&self) -> Option<Duration> {
        if self.absolute_ttl_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.absolute_ttl_ms))
        }
    }

    /// Sliding idle window, or `None` when unbounded.
    #[must_use]
    pub const fn idle_ttl(&self) -> Option<Duration> {
        if self.idle_ttl_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.idle_ttl_ms))
        }
    }
}
