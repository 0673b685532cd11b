//! Builder for composing a publisher store with middleware layers.
//!
//! Layers form an "onion" around the raw store. The `layers` vector stores them
//! **outermost first** (last added = outermost) and `build()` applies them in
//! reverse, so `builder.with_cache(..).layer(custom)` yields
//! `custom(CachingStore(raw))`.
//!
//! This matches [`MiddlewareStack`](tally_core::MiddlewareStack) where `layers[0]`
//! is the outermost layer.

use std::sync::Arc;
use std::time::Duration;

use tally_core::{
    CacheConfig, MiddlewareLayer, MiddlewareStack, PublisherStore, StoreMiddleware,
};

use crate::cache::{CacheMiddleware, CachingStore};

/// Generic middleware builder for composing a store with layered wrappers.
///
/// See [module-level documentation](self) for details on layer ordering.
pub struct StoreBuilder {
    raw: Arc<dyn PublisherStore>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn StoreMiddleware>>,
}

impl StoreBuilder {
    /// Create a new builder from a raw, unwrapped store.
    #[must_use]
    pub fn new(raw: Arc<dyn PublisherStore>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the publisher cache.
    ///
    /// The cache is inserted at the outermost position so hits never reach inner layers.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CachingStore::LAYER_NAME);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CachingStore::LAYER_NAME);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn StoreMiddleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Export the current middleware stack configuration for inspection.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in self.layers.iter().rev() {
            stack.push_outer(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack
    }

    /// Construct a builder from a raw store and a previously exported stack.
    ///
    /// Unknown layer names are ignored.
    #[must_use]
    pub fn from_stack(raw: Arc<dyn PublisherStore>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn StoreMiddleware>> = Vec::new();
        for l in &stack.layers {
            if l.name == CachingStore::LAYER_NAME {
                let defaults = CacheConfig::default();
                let max_capacity = l
                    .config
                    .get("max_capacity")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(defaults.max_capacity);
                let ttl = l
                    .config
                    .get("ttl_ms")
                    .and_then(serde_json::Value::as_u64)
                    .map_or(defaults.ttl, Duration::from_millis);
                layers.push(Box::new(CacheMiddleware::new(CacheConfig { max_capacity, ttl })));
            }
        }
        Self { raw, layers }
    }

    /// Build the wrapped store, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn PublisherStore> {
        let mut acc: Arc<dyn PublisherStore> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
