//! Tally-specific data transfer objects, configuration primitives and the shared error type.
#![warn(missing_docs)]

mod config;
mod error;
mod keys;
mod middleware;
mod outcome;
mod publisher;
mod visit;

pub use config::{CacheConfig, TallyConfig};
pub use error::TallyError;
pub use keys::{MediaKey, Platform, PublisherKey, WindowId};
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use outcome::{AttributionOutcome, DurationOutcome, DurationUpdate, PanelInfoRequest};
pub use publisher::{MediaDurationEntry, PublisherRecord, PublisherStatus};
pub use visit::{AttributionRequest, ChannelVisit, CustomVisit, UserVisit, VideoVisit, VisitSignals};
