//! Re-export of foundational types from `tally-types`.
// Consolidated re-exports so downstream crates can depend on `tally-core` only

pub use tally_types::TallyError;

pub use tally_types::{CacheConfig, TallyConfig};
pub use tally_types::{MediaDurationEntry, PublisherRecord, PublisherStatus};
pub use tally_types::{MediaKey, Platform, PublisherKey, WindowId};
pub use tally_types::{MiddlewareLayer, MiddlewareStack};
pub use tally_types::{
    AttributionOutcome, AttributionRequest, ChannelVisit, CustomVisit, DurationOutcome,
    DurationUpdate, PanelInfoRequest, UserVisit, VideoVisit, VisitSignals,
};
