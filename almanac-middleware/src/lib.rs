//! almanac-middleware
//!
//! Middleware wrappers for almanac aggregators and the builder that stacks them.

mod builder;
mod cache;

pub use crate::builder::AggregatorBuilder;
pub use crate::cache::{CacheMiddleware, CachingAggregator};
