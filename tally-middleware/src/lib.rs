//! tally-middleware
//!
//! Wrappers composed around a `PublisherStore` and the builder that stacks them.

mod builder;
mod cache;

pub use crate::builder::StoreBuilder;
pub use crate::cache::{CacheMiddleware, CachingStore};
