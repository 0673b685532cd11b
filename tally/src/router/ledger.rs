//! Reconciliation state for watch time reported separately from visits.
//!
//! Two maps live behind one mutex:
//! - `claims`: media keys whose visit has been dispatched but not finished, with the
//!   publisher that visit resolves to. Registered before the visit task is spawned.
//! - `pending`: seconds reported for media keys with no known publisher, bounded by
//!   the number of distinct keys.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_core::{MediaKey, PublisherKey, TallyError};

#[derive(Default)]
struct LedgerState {
    claims: HashMap<MediaKey, Claim>,
    pending: HashMap<MediaKey, u64>,
}

struct Claim {
    owner: PublisherKey,
    visits: usize,
}

pub(crate) struct MediaLedger {
    capacity: usize,
    state: Mutex<LedgerState>,
}

/// Where a duration update was routed by [`MediaLedger::route_or_buffer`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Routed {
    /// A visit for the media key is in flight and resolves to this publisher.
    InFlight(PublisherKey),
    /// Held; carries the total now pending for the key.
    Buffered(u64),
}

/// Marks a media key as owned by an in-flight visit until dropped.
pub(crate) struct MediaClaim {
    ledger: Arc<MediaLedger>,
    media: MediaKey,
}

impl MediaClaim {
    pub(crate) const fn media(&self) -> &MediaKey {
        &self.media
    }
}

impl Drop for MediaClaim {
    fn drop(&mut self) {
        self.ledger.release(&self.media);
    }
}

impl MediaLedger {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(LedgerState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an in-flight visit for `media` resolving to `owner`.
    pub(crate) fn claim(self: &Arc<Self>, media: MediaKey, owner: PublisherKey) -> MediaClaim {
        {
            let mut state = self.lock();
            match state.claims.entry(media.clone()) {
                Entry::Occupied(mut e) => {
                    let claim = e.get_mut();
                    claim.owner = owner;
                    claim.visits += 1;
                }
                Entry::Vacant(e) => {
                    e.insert(Claim { owner, visits: 1 });
                }
            }
        }
        MediaClaim {
            ledger: Arc::clone(self),
            media,
        }
    }

    fn release(&self, media: &MediaKey) {
        let mut state = self.lock();
        if let Entry::Occupied(mut e) = state.claims.entry(media.clone()) {
            e.get_mut().visits -= 1;
            if e.get().visits == 0 {
                e.remove();
            }
        }
    }

    /// Route an update to an in-flight visit, or buffer it when none exists.
    ///
    /// Checking and buffering happen under one lock, so a visit claiming the key
    /// afterwards always sees the buffered seconds.
    ///
    /// # Errors
    /// Returns `PendingBufferFull` when the key is new and the buffer is at capacity.
    pub(crate) fn route_or_buffer(&self, media: &MediaKey, secs: u64) -> Result<Routed, TallyError> {
        let mut state = self.lock();
        if let Some(claim) = state.claims.get(media) {
            return Ok(Routed::InFlight(claim.owner.clone()));
        }
        let at_capacity = state.pending.len() >= self.capacity;
        match state.pending.entry(media.clone()) {
            Entry::Occupied(mut e) => {
                let total = e.get().saturating_add(secs);
                e.insert(total);
                Ok(Routed::Buffered(total))
            }
            Entry::Vacant(_) if at_capacity => Err(TallyError::PendingBufferFull {
                capacity: self.capacity,
            }),
            Entry::Vacant(e) => {
                e.insert(secs);
                Ok(Routed::Buffered(secs))
            }
        }
    }

    /// Publisher of an in-flight visit for `media`, if any.
    pub(crate) fn in_flight_owner(&self, media: &MediaKey) -> Option<PublisherKey> {
        self.lock().claims.get(media).map(|c| c.owner.clone())
    }

    /// Remove and return every buffered second for `media`.
    pub(crate) fn take_pending(&self, media: &MediaKey) -> u64 {
        self.lock().pending.remove(media).unwrap_or(0)
    }

    /// Put back seconds taken by a merge whose save failed.
    ///
    /// Restored seconds bypass the capacity check: they were already accepted once.
    pub(crate) fn restore_pending(&self, media: &MediaKey, secs: u64) {
        if secs == 0 {
            return;
        }
        let mut state = self.lock();
        let slot = state.pending.entry(media.clone()).or_insert(0);
        *slot = slot.saturating_add(secs);
    }

    pub(crate) fn pending(&self, media: &MediaKey) -> Option<u64> {
        self.lock().pending.get(media).copied()
    }
}
