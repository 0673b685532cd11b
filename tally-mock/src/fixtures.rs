//! Canned publisher records for tests and demos.

use tally_core::{
    MediaDurationEntry, MediaKey, PublisherKey, PublisherRecord, PublisherStatus,
};

/// Channel id of the `acme` fixture.
pub const ACME_CHANNEL: &str = "UC123";
/// Channel id of the `verified_news` fixture.
pub const NEWS_CHANNEL: &str = "UCnews42";

/// An unverified channel with no watch time yet.
#[must_use]
pub fn acme() -> PublisherRecord {
    let mut record = PublisherRecord::new(PublisherKey::new(format!(
        "youtube#channel:{ACME_CHANNEL}"
    )));
    record.name = "Acme".to_string();
    record.url = format!("https://www.youtube.com/channel/{ACME_CHANNEL}");
    record.favicon_url = "https://yt3.ggpht.com/acme.jpg".to_string();
    record.channel_id = ACME_CHANNEL.to_string();
    record
}

/// A verified channel owning one video with 120 seconds of watch time.
#[must_use]
pub fn verified_news() -> PublisherRecord {
    let key = PublisherKey::new(format!("youtube#channel:{NEWS_CHANNEL}"));
    let media = MediaKey::new("youtube_news0001");
    let mut record = PublisherRecord::new(key.clone());
    record.name = "Daily News".to_string();
    record.url = format!("https://www.youtube.com/channel/{NEWS_CHANNEL}");
    record.favicon_url = "https://yt3.ggpht.com/news.jpg".to_string();
    record.channel_id = NEWS_CHANNEL.to_string();
    record.status = PublisherStatus::Verified;
    let mut entry = MediaDurationEntry::new(media.clone(), key);
    entry.accumulated_duration_secs = 120;
    record.media.insert(media, entry);
    record
}
