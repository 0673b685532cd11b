//! Middleware trait for wrapping `PublisherStore` implementations.

use std::sync::Arc;

use crate::store::PublisherStore;

/// Trait implemented by store middleware layers.
///
/// A middleware consumes an inner `PublisherStore` and returns a wrapped store
/// that augments its behavior (e.g., caching).
pub trait StoreMiddleware: Send + Sync {
    /// Apply this middleware to wrap an inner store and return the wrapped store.
    fn apply(self: Box<Self>, inner: Arc<dyn PublisherStore>) -> Arc<dyn PublisherStore>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
