//! Identifier types shared across crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed identifier of a video-hosting platform.
///
/// The inner name doubles as the fixed prefix of every key derived for that platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform(pub &'static str);

impl Platform {
    /// The YouTube platform (`youtube#channel:<id>`, `youtube_<media id>`).
    pub const YOUTUBE: Self = Self("youtube");

    /// Construct a new typed platform from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::YOUTUBE
    }
}

impl From<Platform> for &'static str {
    fn from(p: Platform) -> Self {
        p.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Canonical, globally unique publisher identifier (e.g. `youtube#channel:UC123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublisherKey(String);

impl PublisherKey {
    /// Wrap an already-canonical key.
    ///
    /// Derivation from raw signals lives in `tally_core::keys`; this constructor
    /// performs no normalization.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublisherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PublisherKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of one piece of content under a platform (e.g. `youtube_dQw4w9WgXcQ`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaKey(String);

impl MediaKey {
    /// Wrap an already-canonical media key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MediaKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque window (tab) identifier owned by the UI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl From<u64> for WindowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
