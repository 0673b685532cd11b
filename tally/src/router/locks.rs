//! Per-publisher-key async locks.
//!
//! Every read-modify-write cycle against the store holds the lock for its key, so
//! two visits to the same publisher never both read the old record and then
//! overwrite each other's merge. Entries are dropped once no task holds or waits
//! on them, so the table only grows with the number of keys in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

use tally_core::PublisherKey;

type Slot = Arc<tokio::sync::Mutex<()>>;

#[derive(Default)]
pub(crate) struct KeyLocks {
    table: Mutex<HashMap<PublisherKey, Slot>>,
}

/// Held for the duration of one read-modify-write cycle.
pub(crate) struct KeyGuard<'a> {
    locks: &'a KeyLocks,
    key: PublisherKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyLocks {
    pub(crate) async fn acquire(&self, key: &PublisherKey) -> KeyGuard<'_> {
        let slot = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(table.entry(key.clone()).or_default())
        };
        let guard = slot.lock_owned().await;
        KeyGuard {
            locks: self,
            key: key.clone(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn release(&self, key: &PublisherKey) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the table itself still references the slot: nobody holds or waits
        if table.get(key).is_some_and(|slot| Arc::strong_count(slot) == 1) {
            table.remove(key);
        }
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(&self.key);
    }
}
