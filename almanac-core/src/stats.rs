//! Process-wide latency statistics keyed by provider name.
//!
//! Each provider's samples live behind their own mutex. The outer registry is
//! only write-locked the first time a provider name is seen, so concurrent
//! recordings for different providers never contend on a shared lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use crate::ProviderStatistic;

/// Upper bound (exclusive) of the "fast" bucket in milliseconds.
pub const FAST_BELOW_MS: u64 = 100;
/// Upper bound (inclusive) of the "average" bucket in milliseconds.
pub const AVERAGE_UP_TO_MS: u64 = 200;

/// Latency bucket of a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyBucket {
    /// Below 100ms.
    Fast,
    /// 100ms to 200ms inclusive.
    Average,
    /// Above 200ms.
    Slow,
}

impl LatencyBucket {
    /// Bucket for an elapsed time in milliseconds.
    #[must_use]
    pub const fn of(elapsed_ms: u64) -> Self {
        if elapsed_ms < FAST_BELOW_MS {
            Self::Fast
        } else if elapsed_ms <= AVERAGE_UP_TO_MS {
            Self::Average
        } else {
            Self::Slow
        }
    }
}

#[derive(Debug, Default)]
struct Samples {
    latencies_ms: Vec<u64>,
    fast: u64,
    average: u64,
    slow: u64,
    sum_ms: u128,
}

impl Samples {
    fn push(&mut self, ms: u64) {
        self.latencies_ms.push(ms);
        self.sum_ms += u128::from(ms);
        match LatencyBucket::of(ms) {
            LatencyBucket::Fast => self.fast += 1,
            LatencyBucket::Average => self.average += 1,
            LatencyBucket::Slow => self.slow += 1,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn summarize(&self, name: &str) -> ProviderStatistic {
        let total = self.latencies_ms.len() as u64;
        let mean = if total == 0 {
            0.0
        } else {
            self.sum_ms as f64 / total as f64
        };
        ProviderStatistic {
            api_name: name.to_string(),
            total_requests: total,
            fast_requests: self.fast,
            average_requests: self.average,
            slow_requests: self.slow,
            average_response_time: mean,
        }
    }
}

type Slot = Arc<Mutex<Samples>>;

/// Concurrency-safe recorder of per-provider request latencies.
///
/// Share one instance (behind an `Arc`) across every orchestrator in a process.
#[derive(Debug, Default)]
pub struct StatisticsRecorder {
    providers: RwLock<HashMap<String, Slot>>,
}

impl StatisticsRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, provider: &str) -> Slot {
        {
            let read = self
                .providers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = read.get(provider) {
                return Arc::clone(slot);
            }
        }
        let mut write = self
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(write.entry(provider.to_string()).or_default())
    }

    /// Append one observation for `provider`.
    pub fn record_ms(&self, provider: &str, elapsed_ms: u64) {
        let slot = self.slot(provider);
        slot.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(elapsed_ms);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "almanac::stats",
            provider,
            elapsed_ms,
            "recorded provider latency"
        );
    }

    /// Append one observation for `provider`, truncating to whole milliseconds.
    pub fn record(&self, provider: &str, elapsed: Duration) {
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.record_ms(provider, ms);
    }

    /// Summaries for every provider seen so far, ordered by provider name.
    ///
    /// Each summary is consistent on its own; summaries of different providers
    /// may reflect slightly different instants.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ProviderStatistic> {
        let slots: Vec<(String, Slot)> = {
            let read = self
                .providers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            read.iter()
                .map(|(k, v)| (k.clone(), Arc::clone(v)))
                .collect()
        };
        let mut out: Vec<ProviderStatistic> = slots
            .iter()
            .map(|(name, slot)| {
                slot.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .summarize(name)
            })
            .collect();
        out.sort_by(|a, b| a.api_name.cmp(&b.api_name));
        out
    }

    /// Summary for a single provider, if it has been seen.
    #[must_use]
    pub fn get(&self, provider: &str) -> Option<ProviderStatistic> {
        let slot = {
            let read = self
                .providers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            read.get(provider).cloned()
        }?;
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        Some(guard.summarize(provider))
    }

    /// Raw observations for `provider` in recording order.
    #[must_use]
    pub fn latencies(&self, provider: &str) -> Vec<u64> {
        let slot = {
            let read = self
                .providers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            read.get(provider).cloned()
        };
        slot.map(|s| {
            s.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .latencies_ms
                .clone()
        })
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges() {
        assert_eq!(LatencyBucket::of(0), LatencyBucket::Fast);
        assert_eq!(LatencyBucket::of(99), LatencyBucket::Fast);
        assert_eq!(LatencyBucket::of(100), LatencyBucket::Average);
        assert_eq!(LatencyBucket::of(200), LatencyBucket::Average);
        assert_eq!(LatencyBucket::of(201), LatencyBucket::Slow);
    }

    #[test]
    fn unseen_provider_has_no_summary() {
        let rec = StatisticsRecorder::new();
        assert!(rec.get("weather").is_none());
        assert!(rec.latencies("weather").is_empty());
        assert!(rec.snapshot().is_empty());
    }
}
