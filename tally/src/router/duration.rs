//! Watch time reported separately from visits.
//!
//! An update finds its publisher through, in order: the caller's publisher key hint,
//! a visit in flight for the same media key, the store's media index. When none is
//! known the seconds are buffered per media key and folded in by the next visit
//! carrying that key. A full buffer rejects the update and notifies the window.

use tally_core::{
    DurationOutcome, DurationUpdate, MediaKey, PublisherKey, TallyError, WindowId, accrue,
    derive_media_key, derive_publisher_key,
};

use crate::Tally;
use crate::router::ledger::Routed;
use crate::router::resolve::{fresh_record, non_empty};

impl Tally {
    /// Merge separately reported watch time into the publisher owning the media key.
    ///
    /// Only rejections are reported to the window (as attribution failures); applied
    /// and buffered updates are silent.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::router::update_media_duration",
            skip(self, update),
            fields(
                media = %update.media_key,
                duration = update.duration,
            ),
        )
    )]
    pub async fn update_media_duration(
        &self,
        window_id: WindowId,
        url: &str,
        update: DurationUpdate,
    ) -> DurationOutcome {
        let platform = self.inner.platform;
        let Some(media) = derive_media_key(platform, &update.media_key) else {
            return self.reject(
                window_id,
                url,
                TallyError::insufficient_signal("media key for duration update"),
            );
        };

        let known = match non_empty(&update.publisher_key_hint) {
            Some(hint) => derive_publisher_key(platform, "", hint).ok(),
            None => None,
        };
        let known = match known.or_else(|| self.inner.ledger.in_flight_owner(&media)) {
            Some(key) => Some(key),
            None => self.owner_of_media(&media).await,
        };

        let key = match known {
            Some(key) => key,
            None => match self.inner.ledger.route_or_buffer(&media, update.duration) {
                Ok(Routed::InFlight(key)) => key,
                Ok(Routed::Buffered(pending_secs)) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(media = %media, pending_secs, "no publisher known yet; duration buffered");
                    return DurationOutcome::Buffered { pending_secs };
                }
                Err(e) => return self.reject(window_id, url, e),
            },
        };

        self.apply_duration(window_id, url, key, &media, update.duration)
            .await
    }

    async fn apply_duration(
        &self,
        window_id: WindowId,
        url: &str,
        key: PublisherKey,
        media: &MediaKey,
        secs: u64,
    ) -> DurationOutcome {
        let _guard = self.lock_key(&key).await;
        let existing = match self.lookup(&key).await {
            Ok(found) => found,
            Err(e) => return self.reject(window_id, url, e),
        };
        let mut record = existing.unwrap_or_else(|| fresh_record(self.inner.platform, key));

        let taken = self.inner.ledger.take_pending(media);
        accrue(&mut record, media, secs.saturating_add(taken));

        match self.save(&record).await {
            Ok(()) => DurationOutcome::Applied { record },
            Err(e) => {
                self.inner.ledger.restore_pending(media, taken);
                self.reject(window_id, url, e)
            }
        }
    }

    fn reject(&self, window_id: WindowId, url: &str, reason: TallyError) -> DurationOutcome {
        #[cfg(feature = "tracing")]
        tracing::warn!(window = %window_id, url = %url, error = %reason, "duration update rejected");
        self.notify_media_activity_error(window_id, url);
        DurationOutcome::Rejected { reason }
    }
}
