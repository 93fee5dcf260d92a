use std::sync::Arc;

use almanac_core::{Aggregate, AggregateQuery, Middleware, QueryKey};
use almanac_types::{AlmanacError, CacheConfig, Status, UnifiedResult};
use async_trait::async_trait;
use moka::future::Cache;

/// A miss that produced something the cache must not keep.
///
/// Returned from the single-flight initializer so moka skips the insert while
/// still handing the value to every waiter on the same key.
#[derive(Debug)]
enum Bypass {
    Failed(AlmanacError),
    Uncacheable(UnifiedResult),
}

type Store = Cache<QueryKey, Arc<UnifiedResult>>;

fn build_store(cfg: &CacheConfig) -> Option<Store> {
    let ttl = cfg.absolute_ttl()?;
    let mut builder = Cache::builder()
        .max_capacity(cfg.max_entries.max(1))
        .time_to_live(ttl);
    if let Some(idle) = cfg.idle_ttl() {
        builder = builder.time_to_idle(idle);
    }
    Some(builder.build())
}

/// Declarative wrapper that applies caching when building an aggregator stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Create a middleware that will wrap its inner aggregator with `cfg`.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn Aggregate>) -> Arc<dyn Aggregate> {
        let Self { cfg } = *self;
        Arc::new(CachingAggregator::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "absolute_ttl_ms": self.cfg.absolute_ttl_ms,
            "idle_ttl_ms": self.cfg.idle_ttl_ms,
            "max_entries": self.cfg.max_entries,
        })
    }
}

/// Cache-aside front for another [`Aggregate`].
///
/// Entries are keyed by [`QueryKey`] and expire at a fixed time after the write
/// or after a period without reads, whichever comes first. Concurrent misses on
/// one key share a single inner aggregation; misses on different keys run
/// independently. Results whose status is `failure` and inner errors are
/// handed to the callers waiting on that key but never stored.
pub struct CachingAggregator {
    inner: Arc<dyn Aggregate>,
    store: Option<Store>,
}

impl CachingAggregator {
    /// Wrap `inner`. A zero absolute TTL yields a pass-through wrapper.
    #[must_use]
    pub fn new(inner: Arc<dyn Aggregate>, cfg: &CacheConfig) -> Self {
        Self {
            inner,
            store: build_store(cfg),
        }
    }

    /// Look up `query`, computing and storing it on a miss.
    ///
    /// # Errors
    /// Propagates errors from the inner aggregator; they are not cached.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "almanac::middleware::cache::get",
            skip(self, query),
            fields(key = %query.key()),
        )
    )]
    pub async fn get(&self, query: &AggregateQuery) -> Result<UnifiedResult, AlmanacError> {
        let Some(store) = &self.store else {
            return self.inner.aggregate(query).await;
        };
        let key = query.key();

        if let Some(hit) = store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "almanac::cache", "cache hit");
            return Ok(UnifiedResult::clone(&hit));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "almanac::cache", "cache miss");

        let inner = &self.inner;
        let outcome = store
            .try_get_with(key, async move {
                match inner.aggregate(query).await {
                    Ok(result) if result.status == Status::Failure => {
                        Err(Bypass::Uncacheable(result))
                    }
                    Ok(result) => Ok(Arc::new(result)),
                    Err(e) => Err(Bypass::Failed(e)),
                }
            })
            .await;

        match outcome {
            Ok(value) => Ok(UnifiedResult::clone(&value)),
            Err(shared) => match shared.as_ref() {
                Bypass::Uncacheable(result) => Ok(result.clone()),
                Bypass::Failed(e) => Err(e.clone()),
            },
        }
    }

    /// Drop the entry for `query`, if any.
    pub async fn invalidate(&self, query: &AggregateQuery) {
        if let Some(store) = &self.store {
            store.invalidate(&query.key()).await;
        }
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        if let Some(store) = &self.store {
            store.invalidate_all();
        }
    }

    /// Number of live entries after flushing pending maintenance.
    pub async fn entry_count(&self) -> u64 {
        match &self.store {
            Some(store) => {
                store.run_pending_tasks().await;
                store.entry_count()
            }
            None => 0,
        }
    }

    /// True when a zero absolute TTL turned caching off.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.store.is_none()
    }
}

#[async_trait]
impl Aggregate for CachingAggregator {
    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    async fn aggregate(&self, query: &AggregateQuery) -> Result<UnifiedResult, AlmanacError> {
        self.get(query).await
    }
}
