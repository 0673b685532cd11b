//! Configuration types shared across the orchestrator and store middleware.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Global configuration for the `Tally` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Optional bound on every store call.
    ///
    /// The store normally governs its own timeouts. When set, an expired lookup is
    /// handled like any other lookup failure and an expired save fails the request.
    pub store_timeout: Option<Duration>,
    /// Maximum number of media keys holding buffered duration at once.
    pub max_pending_media: usize,
    /// Serialize read-modify-write cycles per publisher key inside the process.
    ///
    /// Disable only when the store performs atomic read-modify-write itself.
    pub serialize_per_key: bool,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            store_timeout: None,
            max_pending_media: 1024,
            serialize_per_key: true,
        }
    }
}

/// Configuration for the publisher cache middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of publisher records kept.
    pub max_capacity: u64,
    /// Time-to-live of a cached record.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1000,
            ttl: Duration::from_secs(300),
        }
    }
}
