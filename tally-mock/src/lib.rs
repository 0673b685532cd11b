//! Test doubles for the tally workspace.
//!
//! - [`MemoryStore`]: an in-memory `PublisherStore` whose behavior per key is
//!   scripted through a [`MemoryStoreController`] (fail, hang, delay).
//! - [`RecordingReporter`]: a `WindowReporter` that keeps every report in order.
//! - [`fixtures`]: canned publisher records.

pub mod fixtures;
mod reporter;
mod store;

pub use reporter::{RecordingReporter, Report};
pub use store::{MemoryStore, MemoryStoreController, StoreBehavior};
