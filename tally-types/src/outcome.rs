//! Results reported back to windows.

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::keys::{PublisherKey, WindowId};
use crate::publisher::PublisherRecord;

/// Terminal result of one attribution or panel-info request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributionOutcome {
    /// A publisher was resolved (and, for visits, persisted).
    Resolved {
        /// Originating window.
        window_id: WindowId,
        /// Originating url.
        url: String,
        /// The resolved record.
        record: PublisherRecord,
    },
    /// No publisher could be attributed.
    Failed {
        /// Originating window.
        window_id: WindowId,
        /// Originating url.
        url: String,
        /// Why attribution failed.
        reason: TallyError,
    },
}

impl AttributionOutcome {
    /// Originating window.
    #[must_use]
    pub const fn window_id(&self) -> WindowId {
        match self {
            Self::Resolved { window_id, .. } | Self::Failed { window_id, .. } => *window_id,
        }
    }

    /// Originating url.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Resolved { url, .. } | Self::Failed { url, .. } => url,
        }
    }

    /// The resolved record, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&PublisherRecord> {
        match self {
            Self::Resolved { record, .. } => Some(record),
            Self::Failed { .. } => None,
        }
    }

    /// Consume the outcome, yielding the record or the failure reason.
    ///
    /// # Errors
    /// Returns the failure reason when attribution failed.
    pub fn into_result(self) -> Result<PublisherRecord, TallyError> {
        match self {
            Self::Resolved { record, .. } => Ok(record),
            Self::Failed { reason, .. } => Err(reason),
        }
    }

    /// True when a publisher was resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Watch-time report for one media key, delivered separately from visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationUpdate {
    /// Media key (or raw media id) the time was observed on.
    pub media_key: String,
    /// Publisher key known to the caller, if any.
    #[serde(default)]
    pub publisher_key_hint: String,
    /// Observed seconds.
    pub duration: u64,
}

impl DurationUpdate {
    /// Update with no publisher hint.
    pub fn new(media_key: impl Into<String>, duration: u64) -> Self {
        Self {
            media_key: media_key.into(),
            publisher_key_hint: String::new(),
            duration,
        }
    }

    /// Attach the publisher key the caller already knows.
    #[must_use]
    pub fn with_publisher(mut self, key: impl Into<String>) -> Self {
        self.publisher_key_hint = key.into();
        self
    }
}

/// Result of applying a [`DurationUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationOutcome {
    /// Merged into the owning publisher and persisted.
    Applied {
        /// The updated record.
        record: PublisherRecord,
    },
    /// No publisher owns the media key yet; held until a visit resolves it.
    Buffered {
        /// Total seconds now pending for the media key.
        pending_secs: u64,
    },
    /// The update could not be applied or held.
    Rejected {
        /// Why the update was rejected.
        reason: TallyError,
    },
}

impl DurationOutcome {
    /// Key of the publisher the update was applied to.
    #[must_use]
    pub const fn publisher_key(&self) -> Option<&PublisherKey> {
        match self {
            Self::Applied { record } => Some(&record.key),
            Self::Buffered { .. } | Self::Rejected { .. } => None,
        }
    }
}

/// Signals used to show publisher info in a panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelInfoRequest {
    /// Platform-native channel identifier, possibly empty.
    pub channel_id: String,
    /// Publisher key computed upstream, possibly empty.
    pub publisher_key_hint: String,
    /// Avatar reference.
    pub favicon_url: String,
    /// Display title.
    pub title: String,
}
