//! Exponential backoff around a single provider call.

use std::time::Duration;

use almanac_core::{AlmanacError, RetryConfig};
use rand::Rng;

/// Add up to `jitter_percent` of `base_ms` as random extra wait.
pub(crate) fn jitter_wait(base_ms: u64, jitter_percent: u8) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, base_ms.saturating_mul(u64::from(jitter_percent)) / 100)
    };
    let mut rng = rand::rng();
    base_ms + rng.random_range(0..jitter_range)
}

/// Retries transient failures with exponentially growing delays.
///
/// With the default [`RetryConfig`] an operation is attempted at most four
/// times, waiting 2s, 4s and 8s between attempts. Errors for which
/// [`AlmanacError::is_transient`] is false are returned after the first attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy {
    cfg: RetryConfig,
}

impl RetryPolicy {
    /// Build a policy from configuration.
    #[must_use]
    pub const fn new(cfg: RetryConfig) -> Self {
        Self { cfg }
    }

    /// The underlying configuration.
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.cfg
    }

    /// Wait before retry number `retry` (1-based), including jitter.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let base = self.cfg.delay_for(retry);
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(jitter_wait(base_ms, self.cfg.jitter_percent))
    }

    /// Run `op` until it succeeds, fails permanently, or retries run out.
    ///
    /// `label` only feeds diagnostics. The last error is returned unchanged.
    ///
    /// # Errors
    /// Returns the error of the final attempt.
    pub async fn run<T, F, Fut>(&self, label: &'static str, mut op: F) -> Result<T, AlmanacError>
    where
        F: FnMut() -> Fut,
        Fut: core::future::Future<Output = Result<T, AlmanacError>>,
    {
        let mut retry: u32 = 0;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) if e.is_transient() && retry < self.cfg.max_retries => {
                    retry += 1;
                    let delay = self.delay_for(retry);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "almanac::retry",
                        source = label,
                        attempt = retry,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "transient provider failure; retrying"
                    );
                    #[cfg(not(feature = "tracing"))]
                    let _ = (label, &e);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn default_schedule_is_two_four_eight_seconds() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_for(1), Duration::from_secs(2));
        assert_eq!(p.delay_for(2), Duration::from_secs(4));
        assert_eq!(p.delay_for(3), Duration::from_secs(8));
    }

    #[test]
    fn delay_is_capped() {
        let p = RetryPolicy::new(RetryConfig {
            max_delay_ms: 5_000,
            ..RetryConfig::default()
        });
        assert_eq!(p.delay_for(3), Duration::from_secs(5));
        assert_eq!(p.delay_for(40), Duration::from_secs(5));
    }

    #[test]
    fn jitter_stays_within_percent() {
        for _ in 0..200 {
            let ms = jitter_wait(1_000, 10);
            assert!((1_000..1_100).contains(&ms));
        }
        assert_eq!(jitter_wait(1_000, 0), 1_000);
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let res: Result<(), _> = RetryPolicy::default()
            .run("weather", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AlmanacError::Data("bad payload".into())) }
            })
            .await;
        assert!(matches!(res, Err(AlmanacError::Data(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_attempts_once() {
        let calls = AtomicU32::new(0);
        let res: Result<(), _> = RetryPolicy::new(RetryConfig::disabled())
            .run("news", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AlmanacError::network("news", "reset")) }
            })
            .await;
        assert!(res.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
