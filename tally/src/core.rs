use std::sync::Arc;
use std::time::Duration;

use tally_types::{CacheConfig, Platform, TallyConfig};
use tally_core::{PublisherStore, TallyError, WindowReporter};
use tally_middleware::StoreBuilder;

use crate::router::ledger::MediaLedger;
use crate::router::locks::KeyLocks;

/// Orchestrator that resolves visits to publishers and reports the outcome to windows.
///
/// Cheap to clone; every clone shares the same store, reporter, lock table and
/// duration ledger. Spawned attribution tasks hold a clone, so the shared state lives
/// until the last task finishes.
#[derive(Clone)]
pub struct Tally {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) store: Arc<dyn PublisherStore>,
    pub(crate) reporter: Arc<dyn WindowReporter>,
    pub(crate) platform: Platform,
    pub(crate) cfg: TallyConfig,
    pub(crate) locks: KeyLocks,
    pub(crate) ledger: Arc<MediaLedger>,
}

/// Builder for constructing a `Tally` orchestrator with custom configuration.
pub struct TallyBuilder {
    store: Option<Arc<dyn PublisherStore>>,
    reporter: Option<Arc<dyn WindowReporter>>,
    platform: Platform,
    cache: Option<CacheConfig>,
    cfg: TallyConfig,
}

impl Default for TallyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TallyBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no store and no reporter; both are required by [`build`](Self::build).
    /// - Defaults: YouTube platform, no store timeout, 1024 pending media keys,
    ///   per-key serialization on, no cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            reporter: None,
            platform: Platform::YOUTUBE,
            cache: None,
            cfg: TallyConfig::default(),
        }
    }

    /// Register the publisher store.
    ///
    /// Registering a second store replaces the first.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn PublisherStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Register the window reporter results are delivered to.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn WindowReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Select the hosting platform used as key prefix.
    #[must_use]
    pub const fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Wrap the registered store in a write-through publisher cache.
    ///
    /// Behavior and trade-offs:
    /// - Repeat visits to the same publisher skip the store lookup.
    /// - Records changed behind the orchestrator's back stay stale until the TTL
    ///   expires; only use when this process is the store's sole writer.
    #[must_use]
    pub fn with_cache(mut self, cfg: CacheConfig) -> Self {
        self.cache = Some(cfg);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TallyConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Bound every store call.
    ///
    /// An expired lookup proceeds as not-found; an expired save fails the request.
    #[must_use]
    pub const fn store_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.store_timeout = Some(timeout);
        self
    }

    /// Capacity of the buffer holding durations for media keys with no known publisher.
    ///
    /// Zero disables buffering: such updates are rejected.
    #[must_use]
    pub const fn max_pending_media(mut self, capacity: usize) -> Self {
        self.cfg.max_pending_media = capacity;
        self
    }

    /// Toggle in-process serialization of same-key read-modify-write cycles.
    #[must_use]
    pub const fn serialize_per_key(mut self, yes: bool) -> Self {
        self.cfg.serialize_per_key = yes;
        self
    }

    /// Build the `Tally` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no store or no reporter has been registered.
    pub fn build(self) -> Result<Tally, TallyError> {
        let Some(store) = self.store else {
            return Err(TallyError::InvalidArg(
                "no store registered; add one via with_store(...)".to_string(),
            ));
        };
        let Some(reporter) = self.reporter else {
            return Err(TallyError::InvalidArg(
                "no reporter registered; add one via with_reporter(...)".to_string(),
            ));
        };
        let store = match &self.cache {
            Some(cfg) => StoreBuilder::new(store).with_cache(cfg).build(),
            None => store,
        };

        Ok(Tally {
            inner: Arc::new(Inner {
                store,
                reporter,
                platform: self.platform,
                locks: KeyLocks::default(),
                ledger: Arc::new(MediaLedger::new(self.cfg.max_pending_media)),
                cfg: self.cfg,
            }),
        })
    }
}

impl Tally {
    /// Start building a new `Tally` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let tally = tally::Tally::builder()
    ///     .with_store(store)
    ///     .with_reporter(Arc::new(MyWindows::default()))
    ///     .store_timeout(std::time::Duration::from_secs(2))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TallyBuilder {
        TallyBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &TallyConfig {
        &self.inner.cfg
    }

    /// Platform used as key prefix.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.inner.platform
    }

    /// Seconds currently buffered for a media id or key with no known publisher.
    #[must_use]
    pub fn pending_duration(&self, media: &str) -> Option<u64> {
        let key = tally_core::derive_media_key(self.inner.platform, media)?;
        self.inner.ledger.pending(&key)
    }

    /// Wrap a store future with the configured timeout and standardized timeout error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::core::store_call",
            skip(fut),
            fields(
                store = store_name,
                op = op,
                timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
            ),
        )
    )]
    pub(crate) async fn store_call<T, Fut>(
        store_name: &'static str,
        op: &'static str,
        timeout: Option<Duration>,
        fut: Fut,
    ) -> Result<T, TallyError>
    where
        Fut: core::future::Future<Output = Result<T, TallyError>>,
    {
        match timeout {
            Some(t) => (tokio::time::timeout(t, fut).await)
                .unwrap_or_else(|_| Err(TallyError::store_timeout(store_name, op))),
            None => fut.await,
        }
    }
}
