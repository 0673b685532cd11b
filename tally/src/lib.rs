//! Tally attributes page visits on a video-hosting platform to canonical publishers
//! and accrues watch time per media item.
//!
//! Overview
//! - Visits arrive in four shapes (channel, user, video, custom page), each with a
//!   partial set of signals. All of them are normalized into one `PublisherRecord`
//!   keyed deterministically by `youtube#channel:<id>`.
//! - Resolution runs on a spawned Tokio task: lookup, merge, save, then exactly one
//!   report to the originating window.
//! - Watch time is additive per media key. Updates reported separately from visits
//!   are routed to their publisher or buffered until a visit names it.
//!
//! Key behaviors and trade-offs
//! - Lookup failures degrade to "not found": the visit still succeeds with a fresh
//!   record. Save failures are reported to the window as attribution failures.
//! - Same-key visits are serialized in-process, so concurrent merges never lose
//!   seconds. Disable with `serialize_per_key(false)` only when the store performs
//!   atomic read-modify-write itself.
//! - No timeout by default; `store_timeout` bounds each store call.
//! - Panel info lookups never write to the store.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally::{ChannelVisit, Tally, WindowId};
//!
//! let tally = Tally::builder()
//!     .with_store(store)
//!     .with_reporter(Arc::new(windows))
//!     .build()?;
//!
//! let handle = tally.visit_channel(
//!     WindowId(1),
//!     "https://www.youtube.com/channel/UC123",
//!     ChannelVisit {
//!         channel_id: "UC123".into(),
//!         title: "Acme".into(),
//!         ..ChannelVisit::default()
//!     },
//! );
//! let record = handle.join().await.into_result()?;
//! ```
//!
//! See `tally/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]
#![cfg_attr(not(feature = "tracing"), allow(unused_variables))]

pub(crate) mod core;
mod handle;
mod router;

pub use core::{Tally, TallyBuilder};
pub use handle::AttributionHandle;

pub use tally_middleware::{CacheMiddleware, StoreBuilder};

// Re-export core types for convenience
pub use tally_core::{
    AttributionOutcome,
    AttributionRequest,
    CacheConfig,
    ChannelVisit,
    CustomVisit,
    DurationOutcome,
    DurationUpdate,
    MediaDurationEntry,
    MediaKey,
    PanelInfoRequest,
    Platform,
    PublisherKey,
    PublisherRecord,
    PublisherStatus,
    PublisherStore,
    StoreMiddleware,
    TallyConfig,
    TallyError,
    UserVisit,
    VideoVisit,
    VisitSignals,
    WatchtimeBeacon,
    WindowId,
    WindowReporter,
};
