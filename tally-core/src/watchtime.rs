//! Watch-time beacon parsing.
//!
//! While a video plays the page periodically requests
//! `https://www.youtube.com/api/stats/watchtime?docid=<id>&st=<starts>&et=<ends>&...`
//! where `st`/`et` are comma-separated playback interval bounds in seconds (one pair
//! per seek). These helpers turn such a url into a [`DurationUpdate`].

use url::Url;

use crate::keys::derive_media_key;
use crate::{DurationUpdate, MediaKey, Platform};

/// Media id and watched seconds carried by one beacon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchtimeBeacon {
    /// Platform-native media id (`docid`).
    pub media_id: String,
    /// Seconds watched across every reported interval.
    pub duration: u64,
}

impl WatchtimeBeacon {
    /// Parse a beacon url.
    ///
    /// Returns `None` for unparseable urls and beacons without a `docid`.
    #[must_use]
    pub fn parse(beacon: &str) -> Option<Self> {
        let url = Url::parse(beacon).ok()?;
        let media_id = query_param(&url, "docid").filter(|id| !id.is_empty())?;
        Some(Self {
            media_id,
            duration: duration_from_query(&url),
        })
    }

    /// Canonical media key for the beacon's media id.
    #[must_use]
    pub fn media_key(&self, platform: Platform) -> Option<MediaKey> {
        derive_media_key(platform, &self.media_id)
    }

    /// Convert into a duration update for the resolver.
    #[must_use]
    pub fn into_update(self, platform: Platform) -> Option<DurationUpdate> {
        let key = self.media_key(platform)?;
        Some(DurationUpdate::new(key.as_str(), self.duration))
    }
}

/// Sum of `round(et_i - st_i)` over the `st`/`et` interval lists.
///
/// Missing or mismatched lists yield zero; unparseable pairs contribute nothing and a
/// negative total clamps to zero.
#[must_use]
pub fn duration_from_query(url: &Url) -> u64 {
    let (Some(st), Some(et)) = (query_param(url, "st"), query_param(url, "et")) else {
        return 0;
    };
    let starts: Vec<&str> = st.split(',').collect();
    let ends: Vec<&str> = et.split(',').collect();
    if starts.len() != ends.len() {
        return 0;
    }

    let total: i64 = starts
        .iter()
        .zip(&ends)
        .filter_map(|(s, e)| {
            let s = s.trim().parse::<f64>().ok()?;
            let e = e.trim().parse::<f64>().ok()?;
            #[allow(clippy::cast_possible_truncation)]
            Some((e - s + 0.5).floor() as i64)
        })
        .sum();
    u64::try_from(total).unwrap_or(0)
}

/// Media id (`docid` parameter) of a beacon url.
#[must_use]
pub fn media_id_from_beacon(beacon: &str) -> Option<String> {
    let url = Url::parse(beacon).ok()?;
    query_param(&url, "docid").filter(|id| !id.is_empty())
}

/// Watched seconds reported by a beacon url; zero when it cannot be parsed.
#[must_use]
pub fn duration_from_beacon(beacon: &str) -> u64 {
    Url::parse(beacon).map_or(0, |url| duration_from_query(&url))
}

/// Media id (`v` parameter) of a watch page url.
#[must_use]
pub fn media_id_from_video_url(video_url: &str) -> Option<String> {
    let url = Url::parse(video_url).ok()?;
    query_param(&url, "v").filter(|id| !id.is_empty())
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}
