//! The aggregation capability and the middleware trait that wraps it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{AggregateQuery, AlmanacError, UnifiedResult};

/// Anything that can turn a validated query into a structured result.
///
/// Implemented by the plain fan-out orchestrator and by caching wrappers that
/// hold another `Aggregate` inside them.
#[async_trait]
pub trait Aggregate: Send + Sync {
    /// Name used when describing a middleware stack.
    fn name(&self) -> &'static str;

    /// Aggregate all sources for `query`.
    ///
    /// Provider failures are folded into the result's status; the error path is
    /// reserved for conditions that prevent building any result at all.
    async fn aggregate(&self, query: &AggregateQuery) -> Result<UnifiedResult, AlmanacError>;

    /// Validate raw boundary strings, then aggregate.
    ///
    /// # Errors
    /// Returns `InvalidArg` when any input fails validation; nothing is fetched.
    async fn aggregate_raw(
        &self,
        start_date: &str,
        end_date: &str,
        keyword: &str,
        sort_date_by: &str,
        sort_news_by: &str,
    ) -> Result<UnifiedResult, AlmanacError> {
        let query =
            AggregateQuery::parse(start_date, end_date, keyword, sort_date_by, sort_news_by)?;
        self.aggregate(&query).await
    }
}

/// Trait implemented by aggregation middleware layers.
///
/// A middleware consumes an inner `Aggregate` and returns a wrapped one that
/// augments its behavior (e.g., caching).
pub trait Middleware: Send + Sync {
    /// Apply this middleware to wrap an inner aggregator and return the wrapped aggregator.
    fn apply(self: Box<Self>, inner: Arc<dyn Aggregate>) -> Arc<dyn Aggregate>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
