use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use tally_core::{CacheConfig, MediaKey, PublisherKey, PublisherRecord, PublisherStore, TallyError};

/// Declarative wrapper that applies caching when building a store stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Describe a cache layer with the given capacity and time-to-live.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl tally_core::StoreMiddleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn PublisherStore>) -> Arc<dyn PublisherStore> {
        let Self { cfg } = *self;
        Arc::new(CachingStore::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        CachingStore::LAYER_NAME
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_capacity": self.cfg.max_capacity,
            "ttl_ms": u64::try_from(self.cfg.ttl.as_millis()).unwrap_or(u64::MAX),
        })
    }
}

/// Write-through cache in front of a publisher store.
///
/// Only successful lookups that found something are cached; a miss always reaches the
/// inner store, so records created elsewhere become visible immediately. Saves update the
/// cache only after the inner store accepted them.
pub struct CachingStore {
    inner: Arc<dyn PublisherStore>,
    publishers: Cache<PublisherKey, Arc<PublisherRecord>>,
    media_owners: Cache<MediaKey, PublisherKey>,
}

impl CachingStore {
    pub(crate) const LAYER_NAME: &'static str = "CachingStore";

    /// Wrap `inner` with publisher and media-owner caches sized by `cfg`.
    ///
    /// A zero `max_capacity` is raised to one.
    #[must_use]
    pub fn new(inner: Arc<dyn PublisherStore>, cfg: &CacheConfig) -> Self {
        // Zero capacity would make every insert a no-op eviction
        let cap = cfg.max_capacity.max(1);
        Self {
            inner,
            publishers: Cache::builder()
                .max_capacity(cap)
                .time_to_live(cfg.ttl)
                .build(),
            media_owners: Cache::builder()
                .max_capacity(cap.saturating_mul(8))
                .time_to_live(cfg.ttl)
                .build(),
        }
    }

    /// Drop any cached state for a publisher key.
    pub async fn invalidate(&self, key: &PublisherKey) {
        self.publishers.invalidate(key).await;
    }
}

#[async_trait]
impl PublisherStore for CachingStore {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn lookup_publisher(
        &self,
        key: &PublisherKey,
    ) -> Result<Option<PublisherRecord>, TallyError> {
        if let Some(hit) = self.publishers.get(key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %key, "publisher cache hit");
            return Ok(Some(PublisherRecord::clone(&hit)));
        }
        let found = self.inner.lookup_publisher(key).await?;
        if let Some(record) = &found {
            self.publishers
                .insert(key.clone(), Arc::new(record.clone()))
                .await;
        }
        Ok(found)
    }

    async fn save_publisher(&self, record: &PublisherRecord) -> Result<(), TallyError> {
        self.inner.save_publisher(record).await?;
        for media_key in record.media.keys() {
            self.media_owners
                .insert(media_key.clone(), record.key.clone())
                .await;
        }
        self.publishers
            .insert(record.key.clone(), Arc::new(record.clone()))
            .await;
        Ok(())
    }

    async fn lookup_media_publisher(
        &self,
        media_key: &MediaKey,
    ) -> Result<Option<PublisherKey>, TallyError> {
        if let Some(owner) = self.media_owners.get(media_key).await {
            return Ok(Some(owner));
        }
        let found = self.inner.lookup_media_publisher(media_key).await?;
        if let Some(owner) = &found {
            self.media_owners
                .insert(media_key.clone(), owner.clone())
                .await;
        }
        Ok(found)
    }
}
