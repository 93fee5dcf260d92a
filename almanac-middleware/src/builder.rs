//! Builder for composing an aggregator with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Layers form an "onion" around the raw aggregator:
//!
//! ```text
//! User Request
//!     ↓
//! Outermost Middleware (e.g., Cache - answers hits before anything else runs)
//!     ↓
//! Raw Aggregator (fan-out over the weather, astronomy and news providers)
//! ```
//!
//! The `layers` vector stores middleware in **outermost-first** order (last
//! added = outermost) and `build()` applies them in reverse to construct the
//! nesting. This matches [`MiddlewareStack`](almanac_types::MiddlewareStack),
//! where `layers[0]` is the outermost layer.

use std::sync::Arc;

use almanac_core::{Aggregate, Middleware};
use almanac_types::{CacheConfig, MiddlewareLayer, MiddlewareStack};
use serde_json::json;

use crate::cache::CacheMiddleware;

const CACHE_LAYER: &str = "CachingMiddleware";

/// Generic middleware builder for composing an aggregator with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct AggregatorBuilder {
    raw: Arc<dyn Aggregate>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl AggregatorBuilder {
    /// Create a new builder from a raw, unwrapped aggregator.
    #[must_use]
    pub fn new(raw: Arc<dyn Aggregate>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the cache layer at the outermost position.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache layer if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Export the current middleware stack configuration for inspection.
    ///
    /// The raw aggregator is appended as the innermost "layer" for observability.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack.push_inner(MiddlewareLayer::new(
            "RawAggregator",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Construct a builder from a raw aggregator and an explicit stack.
    ///
    /// Unknown layer names are ignored, as is the trailing raw entry written by
    /// [`to_stack`](Self::to_stack).
    #[must_use]
    pub fn from_stack(raw: Arc<dyn Aggregate>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for l in &stack.layers {
            if l.name == CACHE_LAYER {
                let defaults = CacheConfig::default();
                let field = |name: &str, fallback: u64| {
                    l.config
                        .get(name)
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(fallback)
                };
                let cfg = CacheConfig {
                    absolute_ttl_ms: field("absolute_ttl_ms", defaults.absolute_ttl_ms),
                    idle_ttl_ms: field("idle_ttl_ms", defaults.idle_ttl_ms),
                    max_entries: field("max_entries", defaults.max_entries),
                };
                layers.push(Box::new(CacheMiddleware::new(cfg)));
            }
        }
        Self { raw, layers }
    }

    /// Build the wrapped aggregator, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn Aggregate> {
        let mut acc: Arc<dyn Aggregate> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
