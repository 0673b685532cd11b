use crate::{MediaKey, Platform, PublisherKey, TallyError};

const CHANNEL_MARKER: &str = "#channel:";

/// Derive the canonical publisher key for a visit.
///
/// The upstream hint wins over the raw channel id. Either signal may already carry
/// the `"<platform>#channel:"` prefix; it is stripped before the key is rebuilt, so
/// `("UC1", "")`, `("", "UC1")` and `("", "youtube#channel:UC1")` all yield
/// `youtube#channel:UC1`. Surrounding whitespace is ignored.
///
/// # Errors
/// Returns `InsufficientSignal` when neither signal names a channel.
pub fn derive_publisher_key(
    platform: Platform,
    channel_id: &str,
    publisher_key_hint: &str,
) -> Result<PublisherKey, TallyError> {
    let prefix = publisher_prefix(platform);
    let identity = [publisher_key_hint, channel_id]
        .into_iter()
        .map(|s| strip(s.trim(), &prefix))
        .find(|s| !s.is_empty())
        .ok_or_else(|| {
            TallyError::insufficient_signal(format!("{platform} channel id or publisher key"))
        })?;
    Ok(PublisherKey::new(format!("{prefix}{identity}")))
}

/// Derive the canonical media key for a platform-native media id.
///
/// Returns `None` for an empty id, which marks the visit as channel-level. An id that
/// already carries the `"<platform>_"` prefix is kept as is.
#[must_use]
pub fn derive_media_key(platform: Platform, media_id: &str) -> Option<MediaKey> {
    let prefix = media_prefix(platform);
    let id = strip(media_id.trim(), &prefix);
    if id.is_empty() {
        return None;
    }
    Some(MediaKey::new(format!("{prefix}{id}")))
}

/// Public channel page for a YouTube channel id.
#[must_use]
pub fn channel_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{channel_id}")
}

/// Watch page for a YouTube media id.
#[must_use]
pub fn video_url(media_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={media_id}")
}

/// The raw channel id embedded in a canonical publisher key, if it belongs to `platform`.
#[must_use]
pub fn channel_id_of(platform: Platform, key: &PublisherKey) -> Option<&str> {
    key.as_str()
        .strip_prefix(&publisher_prefix(platform))
        .filter(|id| !id.is_empty())
}

fn publisher_prefix(platform: Platform) -> String {
    format!("{platform}{CHANNEL_MARKER}")
}

fn media_prefix(platform: Platform) -> String {
    format!("{platform}_")
}

fn strip<'a>(s: &'a str, prefix: &str) -> &'a str {
    s.strip_prefix(prefix).unwrap_or(s)
}
