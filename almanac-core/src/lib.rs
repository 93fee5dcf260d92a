//! almanac-core
//!
//! Core contracts, types, and pure helpers shared across the almanac workspace.
//!
//! - `provider`: role traits for the weather, astronomy and news clients.
//! - `aggregate`: the `Aggregate` capability and the `Middleware` trait that wraps it.
//! - `query`: boundary validation and the cache fingerprint of a request.
//! - `merge`: the per-day merge of the three datasets.
//! - `outcome`: status classification of per-source results.
//! - `stats`: the process-wide latency recorder.
//!
//! Nothing here performs I/O or depends on an async runtime; the orchestrator
//! in the `almanac` crate drives the providers under Tokio.
#![warn(missing_docs)]

/// The aggregation capability and its middleware trait.
pub mod aggregate;
/// Date-keyed merge of the three source datasets.
pub mod merge;
/// Folding per-source outcomes into a classified result.
pub mod outcome;
/// Provider role traits.
pub mod provider;
/// Validated queries and cache fingerprints.
pub mod query;
/// Per-provider latency statistics.
pub mod stats;

pub use aggregate::{Aggregate, Middleware};
pub use merge::merge_days;
pub use outcome::{assemble, classify};
pub use provider::{AstronomyProvider, NewsProvider, WeatherProvider};
pub use query::{AggregateQuery, QueryKey};
pub use stats::{LatencyBucket, StatisticsRecorder};

pub use almanac_types::*;
