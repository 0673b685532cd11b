//! Persisted publisher entities.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::{MediaKey, PublisherKey};

/// Verification state of a publisher as tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PublisherStatus {
    /// Not registered with the rewards program.
    #[default]
    NotVerified,
    /// Registered but without a verified wallet.
    Connected,
    /// Registered and verified.
    Verified,
}

/// Accumulated watch time for one media key under a publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDurationEntry {
    /// Media the duration was observed on.
    pub media_key: MediaKey,
    /// Owning publisher.
    pub publisher_key: PublisherKey,
    /// Sum of every observed duration, in seconds.
    pub accumulated_duration_secs: u64,
}

impl MediaDurationEntry {
    /// Start an entry with no accumulated time.
    #[must_use]
    pub const fn new(media_key: MediaKey, publisher_key: PublisherKey) -> Self {
        Self {
            media_key,
            publisher_key,
            accumulated_duration_secs: 0,
        }
    }

    /// Add newly observed seconds, saturating at `u64::MAX`. Returns the new total.
    pub const fn merge(&mut self, observed: u64) -> u64 {
        self.accumulated_duration_secs = self.accumulated_duration_secs.saturating_add(observed);
        self.accumulated_duration_secs
    }
}

/// Canonical publisher identity plus the media entries it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherRecord {
    /// Globally unique key.
    pub key: PublisherKey,
    /// Display name.
    pub name: String,
    /// Publisher page url.
    pub url: String,
    /// Avatar reference.
    pub favicon_url: String,
    /// Platform-native channel identifier when known.
    #[serde(default)]
    pub channel_id: String,
    /// Store-owned verification state; never changed by the resolver.
    #[serde(default)]
    pub status: PublisherStatus,
    /// Media entries keyed by media key.
    #[serde(default)]
    pub media: BTreeMap<MediaKey, MediaDurationEntry>,
    /// Time of the last successful attribution.
    #[serde(default)]
    pub last_visited: Option<DateTime<Utc>>,
}

impl PublisherRecord {
    /// Fresh record for a previously unseen key.
    #[must_use]
    pub fn new(key: PublisherKey) -> Self {
        Self {
            key,
            name: String::new(),
            url: String::new(),
            favicon_url: String::new(),
            channel_id: String::new(),
            status: PublisherStatus::default(),
            media: BTreeMap::new(),
            last_visited: None,
        }
    }

    /// Accumulated seconds for a media key, if the publisher owns it.
    #[must_use]
    pub fn media_duration(&self, media_key: &MediaKey) -> Option<u64> {
        self.media
            .get(media_key)
            .map(|e| e.accumulated_duration_secs)
    }

    /// Total seconds across all media entries.
    #[must_use]
    pub fn total_duration(&self) -> u64 {
        self.media
            .values()
            .fold(0u64, |acc, e| acc.saturating_add(e.accumulated_duration_secs))
    }

    /// Whether the store marks this publisher as verified.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self.status, PublisherStatus::Verified)
    }
}
