//! tally-core
//!
//! Core traits and pure helpers shared across the tally workspace.
//!
//! - `store`: the `PublisherStore` contract the resolver persists through.
//! - `reporter`: the `WindowReporter` contract results are delivered to.
//! - `keys`: deterministic publisher/media key derivation.
//! - `duration`: the additive watch-time accumulator.
//! - `page` and `watchtime`: extraction of visit signals from fetched platform pages
//!   and watch-time beacon urls.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Store calls are `async_trait` methods and the orchestrator drives them on Tokio;
//! code that resolves visits must run under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Additive watch-time accounting.
pub mod duration;
/// Publisher and media key derivation.
pub mod keys;
/// Middleware trait implemented by store wrappers.
pub mod middleware;
/// Signal extraction from fetched channel and video pages.
pub mod page;
/// Window reporter trait.
pub mod reporter;
/// Publisher store trait.
pub mod store;
pub mod types;
/// Watch-time beacon parsing.
pub mod watchtime;

pub use duration::{accrue, merge_duration};
pub use keys::{channel_id_of, channel_url, derive_media_key, derive_publisher_key, video_url};
pub use middleware::StoreMiddleware;
pub use reporter::WindowReporter;
pub use store::PublisherStore;
pub use types::*;
pub use watchtime::WatchtimeBeacon;
