#![allow(dead_code)]

use std::sync::Arc;

use tally::{
    ChannelVisit, CustomVisit, MediaKey, PublisherKey, Tally, TallyBuilder, UserVisit, VideoVisit,
    WindowId,
};
use tally_mock::{MemoryStore, MemoryStoreController, RecordingReporter};

pub const W1: WindowId = WindowId(1);
pub const W2: WindowId = WindowId(2);

pub const CHANNEL_URL: &str = "https://www.youtube.com/channel/UC123";
pub const VIDEO_URL: &str = "https://www.youtube.com/watch?v=v1";

/// An orchestrator wired to an in-memory store and a recording reporter.
pub struct Harness {
    pub tally: Tally,
    pub controller: MemoryStoreController,
    pub reporter: Arc<RecordingReporter>,
}

pub fn harness() -> Harness {
    harness_with(|b| b)
}

/// Build a harness after applying extra builder settings.
pub fn harness_with(configure: impl FnOnce(TallyBuilder) -> TallyBuilder) -> Harness {
    let (store, controller) = MemoryStore::new_with_controller("tally-mock");
    let reporter = Arc::new(RecordingReporter::new());
    let builder = Tally::builder()
        .with_store(store)
        .with_reporter(reporter.clone());
    let tally = configure(builder).build().expect("harness builds");
    Harness {
        tally,
        controller,
        reporter,
    }
}

pub fn key(channel_id: &str) -> PublisherKey {
    PublisherKey::new(format!("youtube#channel:{channel_id}"))
}

pub fn media(id: &str) -> MediaKey {
    MediaKey::new(format!("youtube_{id}"))
}

pub fn channel(channel_id: &str, title: &str) -> ChannelVisit {
    ChannelVisit {
        channel_id: channel_id.to_string(),
        title: title.to_string(),
        favicon_url: format!("https://yt3.ggpht.com/{channel_id}.jpg"),
        ..ChannelVisit::default()
    }
}

pub fn video(channel_id: &str, media_id: &str, duration: u64) -> VideoVisit {
    VideoVisit {
        channel_id: channel_id.to_string(),
        media_key: media_id.to_string(),
        title: "Acme".to_string(),
        duration,
        ..VideoVisit::default()
    }
}

pub fn user_by_media(media_id: &str) -> UserVisit {
    UserVisit {
        media_key: media_id.to_string(),
        title: "Some vanity page".to_string(),
        ..UserVisit::default()
    }
}

pub fn anonymous_custom() -> CustomVisit {
    CustomVisit {
        title: "Unknown layout".to_string(),
        ..CustomVisit::default()
    }
}
