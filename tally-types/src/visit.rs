//! Inbound visit shapes.

use serde::{Deserialize, Serialize};

use crate::keys::WindowId;

/// A visit to a channel page (`/channel/<id>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelVisit {
    /// Platform-native channel identifier, possibly empty.
    pub channel_id: String,
    /// Publisher key computed upstream, possibly empty.
    pub publisher_key_hint: String,
    /// Channel avatar reference.
    pub favicon_url: String,
    /// Display title of the channel.
    pub title: String,
}

/// A visit to a user vanity page (`/user/<name>`).
///
/// Vanity pages carry a media key identifying the vanity path itself, which the
/// store can map back to the owning publisher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserVisit {
    /// Platform-native channel identifier, possibly empty.
    pub channel_id: String,
    /// Publisher key computed upstream, possibly empty.
    pub publisher_key_hint: String,
    /// Media key (or raw media id) for the vanity path.
    pub media_key: String,
    /// Display title of the channel.
    pub title: String,
    /// Watch duration observed at visit time, in seconds.
    pub duration: u64,
}

/// A visit to an individual video page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoVisit {
    /// Platform-native channel identifier of the uploader, possibly empty.
    pub channel_id: String,
    /// Publisher key computed upstream, possibly empty.
    pub publisher_key_hint: String,
    /// Media key (or raw media id) of the video.
    pub media_key: String,
    /// Uploader avatar reference.
    pub favicon_url: String,
    /// Display name of the uploader.
    pub title: String,
    /// Watch duration observed at visit time, in seconds.
    pub duration: u64,
}

/// A visit to a page whose layout was not recognized (custom channel URLs and the like).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomVisit {
    /// Platform-native channel identifier, possibly empty.
    pub channel_id: String,
    /// Publisher key computed upstream, possibly empty.
    pub publisher_key_hint: String,
    /// Channel avatar reference.
    pub favicon_url: String,
    /// Display title of the page.
    pub title: String,
}

/// Identifying signals carried by one visit, tagged by page shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path_type", content = "data", rename_all = "snake_case")]
pub enum VisitSignals {
    /// Channel page.
    Channel(ChannelVisit),
    /// User/vanity page.
    User(UserVisit),
    /// Video page.
    Video(VideoVisit),
    /// Unrecognized page layout.
    Custom(CustomVisit),
}

impl VisitSignals {
    /// Short label of the visit shape, used in logs.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Channel(_) => "channel",
            Self::User(_) => "user",
            Self::Video(_) => "video",
            Self::Custom(_) => "custom",
        }
    }

    /// Channel identifier signal.
    #[must_use]
    pub fn channel_id(&self) -> &str {
        match self {
            Self::Channel(v) => &v.channel_id,
            Self::User(v) => &v.channel_id,
            Self::Video(v) => &v.channel_id,
            Self::Custom(v) => &v.channel_id,
        }
    }

    /// Upstream publisher key hint.
    #[must_use]
    pub fn publisher_key_hint(&self) -> &str {
        match self {
            Self::Channel(v) => &v.publisher_key_hint,
            Self::User(v) => &v.publisher_key_hint,
            Self::Video(v) => &v.publisher_key_hint,
            Self::Custom(v) => &v.publisher_key_hint,
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Channel(v) => &v.title,
            Self::User(v) => &v.title,
            Self::Video(v) => &v.title,
            Self::Custom(v) => &v.title,
        }
    }

    /// Favicon reference; user pages never carry one.
    #[must_use]
    pub fn favicon_url(&self) -> Option<&str> {
        match self {
            Self::Channel(v) => Some(&v.favicon_url),
            Self::Video(v) => Some(&v.favicon_url),
            Self::Custom(v) => Some(&v.favicon_url),
            Self::User(_) => None,
        }
    }

    /// Raw media key signal; `None` for channel-level shapes.
    #[must_use]
    pub fn media_key(&self) -> Option<&str> {
        match self {
            Self::User(v) => Some(&v.media_key),
            Self::Video(v) => Some(&v.media_key),
            Self::Channel(_) | Self::Custom(_) => None,
        }
    }

    /// Watch duration observed at visit time; zero for channel-level shapes.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        match self {
            Self::User(v) => v.duration,
            Self::Video(v) => v.duration,
            Self::Channel(_) | Self::Custom(_) => 0,
        }
    }
}

impl From<ChannelVisit> for VisitSignals {
    fn from(v: ChannelVisit) -> Self {
        Self::Channel(v)
    }
}

impl From<UserVisit> for VisitSignals {
    fn from(v: UserVisit) -> Self {
        Self::User(v)
    }
}

impl From<VideoVisit> for VisitSignals {
    fn from(v: VideoVisit) -> Self {
        Self::Video(v)
    }
}

impl From<CustomVisit> for VisitSignals {
    fn from(v: CustomVisit) -> Self {
        Self::Custom(v)
    }
}

/// A visit bound to the window and url it came from.
///
/// Lives only for the duration of one resolution; the window and url route the
/// result back to its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRequest {
    /// Originating window.
    pub window_id: WindowId,
    /// Publisher url reported by the page handler.
    pub url: String,
    /// Identifying signals.
    pub signals: VisitSignals,
}

impl AttributionRequest {
    /// Bind signals to a window and url.
    pub fn new(window_id: WindowId, url: impl Into<String>, signals: impl Into<VisitSignals>) -> Self {
        Self {
            window_id,
            url: url.into(),
            signals: signals.into(),
        }
    }
}
