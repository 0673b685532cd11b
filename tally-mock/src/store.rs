use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tally_core::{MediaKey, PublisherKey, PublisherRecord, PublisherStore, TallyError};

/// Instruction for how a store call should behave for a given key.
#[derive(Clone, Debug)]
pub enum StoreBehavior {
    /// Serve the call from the in-memory map.
    Pass,
    /// Fail immediately with the provided error.
    Fail(TallyError),
    /// Never complete (simulate a stalled backend).
    Hang,
    /// Sleep, then serve the call from the in-memory map.
    Delay(Duration),
    /// Panic inside the call (simulate a crashing backend client).
    Panic,
}

#[derive(Default)]
struct InternalState {
    records: HashMap<PublisherKey, PublisherRecord>,
    lookup_rules: HashMap<PublisherKey, StoreBehavior>,
    save_rules: HashMap<PublisherKey, StoreBehavior>,
    media_rules: HashMap<MediaKey, StoreBehavior>,
    default_lookup: Option<StoreBehavior>,
    default_save: Option<StoreBehavior>,
}

#[derive(Default)]
struct Counters {
    lookups: AtomicUsize,
    saves: AtomicUsize,
    media_lookups: AtomicUsize,
}

/// In-memory publisher store whose per-key behavior is scripted through a
/// [`MemoryStoreController`].
pub struct MemoryStore {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

/// Controller handle used by tests to drive a [`MemoryStore`] from the outside.
#[derive(Clone)]
pub struct MemoryStoreController {
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl MemoryStore {
    /// Create an empty store and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, MemoryStoreController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let counters = Arc::new(Counters::default());
        let store = Arc::new(Self {
            name,
            state: Arc::clone(&state),
            counters: Arc::clone(&counters),
        });
        (store, MemoryStoreController { state, counters })
    }

    /// Create an empty store without keeping a controller.
    #[must_use]
    pub fn new(name: &'static str) -> Arc<Self> {
        Self::new_with_controller(name).0
    }

    async fn apply(behavior: Option<StoreBehavior>) -> Result<(), TallyError> {
        match behavior {
            None | Some(StoreBehavior::Pass) => Ok(()),
            Some(StoreBehavior::Fail(e)) => Err(e),
            Some(StoreBehavior::Hang) => std::future::pending().await,
            Some(StoreBehavior::Delay(d)) => {
                tokio::time::sleep(d).await;
                Ok(())
            }
            Some(StoreBehavior::Panic) => panic!("tally-mock: scripted store panic"),
        }
    }
}

#[async_trait]
impl PublisherStore for MemoryStore {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn lookup_publisher(
        &self,
        key: &PublisherKey,
    ) -> Result<Option<PublisherRecord>, TallyError> {
        self.counters.lookups.fetch_add(1, Ordering::SeqCst);
        // Read the rule without holding the lock across the scripted wait
        let rule = {
            let guard = self.state.lock().await;
            guard
                .lookup_rules
                .get(key)
                .or(guard.default_lookup.as_ref())
                .cloned()
        };
        Self::apply(rule).await?;
        Ok(self.state.lock().await.records.get(key).cloned())
    }

    async fn save_publisher(&self, record: &PublisherRecord) -> Result<(), TallyError> {
        self.counters.saves.fetch_add(1, Ordering::SeqCst);
        let rule = {
            let guard = self.state.lock().await;
            guard
                .save_rules
                .get(&record.key)
                .or(guard.default_save.as_ref())
                .cloned()
        };
        Self::apply(rule).await?;
        let mut guard = self.state.lock().await;
        guard.records.insert(record.key.clone(), record.clone());
        Ok(())
    }

    async fn lookup_media_publisher(
        &self,
        media_key: &MediaKey,
    ) -> Result<Option<PublisherKey>, TallyError> {
        self.counters.media_lookups.fetch_add(1, Ordering::SeqCst);
        let rule = self.state.lock().await.media_rules.get(media_key).cloned();
        Self::apply(rule).await?;
        let guard = self.state.lock().await;
        Ok(guard
            .records
            .values()
            .find(|r| r.media.contains_key(media_key))
            .map(|r| r.key.clone()))
    }
}

impl MemoryStoreController {
    /// Set the behavior of `lookup_publisher` for a specific key.
    pub async fn set_lookup_behavior(&self, key: PublisherKey, behavior: StoreBehavior) {
        self.state.lock().await.lookup_rules.insert(key, behavior);
    }

    /// Set the behavior of `save_publisher` for a specific key.
    pub async fn set_save_behavior(&self, key: PublisherKey, behavior: StoreBehavior) {
        self.state.lock().await.save_rules.insert(key, behavior);
    }

    /// Set the behavior of `lookup_media_publisher` for a specific media key.
    pub async fn set_media_behavior(&self, media_key: MediaKey, behavior: StoreBehavior) {
        self.state.lock().await.media_rules.insert(media_key, behavior);
    }

    /// Behavior of lookups for keys without a specific rule.
    pub async fn set_default_lookup_behavior(&self, behavior: StoreBehavior) {
        self.state.lock().await.default_lookup = Some(behavior);
    }

    /// Behavior of saves for keys without a specific rule.
    pub async fn set_default_save_behavior(&self, behavior: StoreBehavior) {
        self.state.lock().await.default_save = Some(behavior);
    }

    /// Remove every scripted behavior; stored records are kept.
    pub async fn clear_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.lookup_rules.clear();
        guard.save_rules.clear();
        guard.media_rules.clear();
        guard.default_lookup = None;
        guard.default_save = None;
    }

    /// Insert a record directly, bypassing counters and behaviors.
    pub async fn seed(&self, record: PublisherRecord) {
        self.state
            .lock()
            .await
            .records
            .insert(record.key.clone(), record);
    }

    /// Snapshot of the stored record for `key`.
    pub async fn record(&self, key: &PublisherKey) -> Option<PublisherRecord> {
        self.state.lock().await.records.get(key).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Whether nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// `lookup_publisher` calls observed so far.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.counters.lookups.load(Ordering::SeqCst)
    }

    /// `save_publisher` calls observed so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.counters.saves.load(Ordering::SeqCst)
    }

    /// `lookup_media_publisher` calls observed so far.
    #[must_use]
    pub fn media_lookup_count(&self) -> usize {
        self.counters.media_lookups.load(Ordering::SeqCst)
    }

    /// Every store call observed so far.
    #[must_use]
    pub fn io_count(&self) -> usize {
        self.lookup_count() + self.save_count() + self.media_lookup_count()
    }
}
