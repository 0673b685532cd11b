//! Publisher resolution: lookup, merge, save.
//!
//! One pass per request under the publisher's key lock:
//! lookup (errors degrade to not-found) → apply signals and watch time → save.
//! No retries; the caller turns the result into exactly one window report.

use chrono::Utc;

use tally_core::{
    AttributionRequest, MediaKey, Platform, PublisherKey, PublisherRecord, TallyError,
    VisitSignals, accrue, channel_id_of, channel_url,
};

use crate::Tally;
use crate::router::ledger::MediaClaim;
use crate::router::locks::KeyGuard;

impl Tally {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::router::resolve",
            skip(self, request, claim),
            fields(key = %key, media = claim.map(|c| c.media().as_str())),
        )
    )]
    pub(crate) async fn resolve(
        &self,
        request: &AttributionRequest,
        key: PublisherKey,
        claim: Option<&MediaClaim>,
    ) -> Result<PublisherRecord, TallyError> {
        let _guard = self.lock_key(&key).await;
        let platform = self.inner.platform;

        let mut record = self
            .lookup_or_absent(&key)
            .await
            .unwrap_or_else(|| fresh_record(platform, key));
        apply_visit_signals(&mut record, platform, request);

        let mut taken = 0;
        if let Some(claim) = claim {
            taken = self.inner.ledger.take_pending(claim.media());
            let observed = request.signals.duration().saturating_add(taken);
            let total = accrue(&mut record, claim.media(), observed);
            #[cfg(feature = "tracing")]
            tracing::debug!(media = %claim.media(), observed, buffered = taken, total, "accrued watch time");
        }
        record.last_visited = Some(Utc::now());

        if let Err(e) = self.save(&record).await {
            if let Some(claim) = claim {
                self.inner.ledger.restore_pending(claim.media(), taken);
            }
            return Err(e);
        }
        Ok(record)
    }

    pub(crate) async fn lock_key(&self, key: &PublisherKey) -> Option<KeyGuard<'_>> {
        if self.inner.cfg.serialize_per_key {
            Some(self.inner.locks.acquire(key).await)
        } else {
            None
        }
    }

    /// Look up a publisher, classifying store errors as `LookupFailure`.
    pub(crate) async fn lookup(
        &self,
        key: &PublisherKey,
    ) -> Result<Option<PublisherRecord>, TallyError> {
        let store = &self.inner.store;
        Self::store_call(
            store.name(),
            "lookup_publisher",
            self.inner.cfg.store_timeout,
            store.lookup_publisher(key),
        )
        .await
        .map_err(|e| TallyError::lookup_failure(key.as_str(), &e))
    }

    /// Look up a publisher; a failed lookup counts as not found.
    pub(crate) async fn lookup_or_absent(&self, key: &PublisherKey) -> Option<PublisherRecord> {
        match self.lookup(key).await {
            Ok(found) => found,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(key = %key, error = %e, "lookup failed; treating publisher as not found");
                None
            }
        }
    }

    /// Persist a record, classifying store errors as `SaveFailure`.
    pub(crate) async fn save(&self, record: &PublisherRecord) -> Result<(), TallyError> {
        let store = &self.inner.store;
        Self::store_call(
            store.name(),
            "save_publisher",
            self.inner.cfg.store_timeout,
            store.save_publisher(record),
        )
        .await
        .map_err(|e| TallyError::save_failure(record.key.as_str(), &e))
    }

    /// Publisher owning `media` according to the store's media index.
    pub(crate) async fn owner_of_media(&self, media: &MediaKey) -> Option<PublisherKey> {
        let store = &self.inner.store;
        let res = Self::store_call(
            store.name(),
            "lookup_media_publisher",
            self.inner.cfg.store_timeout,
            store.lookup_media_publisher(media),
        )
        .await;
        match res {
            Ok(owner) => owner,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(media = %media, error = %e, "media owner lookup failed; treating as unknown");
                None
            }
        }
    }
}

/// Record for a key the store has never seen.
pub(crate) fn fresh_record(platform: Platform, key: PublisherKey) -> PublisherRecord {
    let mut record = PublisherRecord::new(key);
    if let Some(id) = channel_id_of(platform, &record.key) {
        let id = id.to_string();
        record.url = channel_url(&id);
        record.channel_id = id;
    }
    record
}

pub(crate) fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Overwrite display fields with the visit's non-empty signals.
///
/// Video visits arrive from a watch page, so the publisher url stays the channel page.
fn apply_visit_signals(record: &mut PublisherRecord, platform: Platform, request: &AttributionRequest) {
    let signals = &request.signals;

    if record.channel_id.is_empty()
        && let Some(id) = channel_id_of(platform, &record.key)
    {
        record.channel_id = id.to_string();
    }
    if let Some(title) = non_empty(signals.title()) {
        record.name = title.to_string();
    }
    if let Some(favicon) = signals.favicon_url().and_then(non_empty) {
        record.favicon_url = favicon.to_string();
    }

    let page_url = match signals {
        VisitSignals::Video(_) => None,
        _ => non_empty(&request.url),
    };
    if let Some(url) = page_url {
        record.url = url.to_string();
    } else if record.url.is_empty() && !record.channel_id.is_empty() {
        record.url = channel_url(&record.channel_id);
    }
}
