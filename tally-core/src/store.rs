use async_trait::async_trait;

use crate::{MediaKey, PublisherKey, PublisherRecord, TallyError};

/// Persistent home of publisher records.
///
/// Media duration entries live inside their `PublisherRecord`, so looking up a
/// publisher also yields every stored duration for it. Implementations govern their
/// own timeouts and surface them as errors.
#[async_trait]
pub trait PublisherStore: Send + Sync {
    /// A stable identifier used in logs and error tagging (e.g., "tally-mock").
    fn name(&self) -> &'static str;

    /// Fetch the record stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been saved.
    async fn lookup_publisher(
        &self,
        key: &PublisherKey,
    ) -> Result<Option<PublisherRecord>, TallyError>;

    /// Insert or replace the record stored under `record.key`, including its media entries.
    async fn save_publisher(&self, record: &PublisherRecord) -> Result<(), TallyError>;

    /// Find the publisher owning a media key.
    ///
    /// Returns `Ok(None)` when no saved record carries an entry for `media_key`.
    async fn lookup_media_publisher(
        &self,
        media_key: &MediaKey,
    ) -> Result<Option<PublisherKey>, TallyError>;

    /// Accumulated seconds stored for a media key.
    ///
    /// Default: resolves the owning publisher, then reads the entry from its record.
    async fn lookup_media_duration(&self, media_key: &MediaKey) -> Result<Option<u64>, TallyError> {
        let Some(key) = self.lookup_media_publisher(media_key).await? else {
            return Ok(None);
        };
        Ok(self
            .lookup_publisher(&key)
            .await?
            .and_then(|r| r.media_duration(media_key)))
    }
}
