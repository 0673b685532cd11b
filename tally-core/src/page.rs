//! Pulls publisher signals out of raw channel/video page markup.
//!
//! The helpers are marker based: they look for a known prefix and read up to a
//! terminator. They never fetch anything and never validate the page beyond that.

use crate::TallyError;

const CHANNEL_ID_MARKERS: &[(&str, &str)] = &[
    ("\"ucid\":\"", "\""),
    ("HeaderRenderer\":{\"channelId\":\"", "\""),
    (
        "<link rel=\"canonical\" href=\"https://www.youtube.com/channel/",
        "\">",
    ),
    ("browseEndpoint\":{\"browseId\":\"", "\""),
];

const FAVICON_MARKERS: &[(&str, &str)] = &[
    ("\"avatar\":{\"thumbnails\":[{\"url\":\"", "\""),
    ("\"width\":88,\"height\":88},{\"url\":\"", "\""),
];

const AUTHOR_MARKER: (&str, &str) = ("\"author\":\"", "\"");

/// Return the text between the first `after` marker and the next `until` terminator.
///
/// With an empty or missing terminator the match runs to the end of `data`. A
/// terminator directly after the marker yields an empty match, which is reported
/// as `None` like a missing marker.
#[must_use]
pub fn extract_between<'a>(data: &'a str, after: &str, until: &str) -> Option<&'a str> {
    let start = data.find(after)? + after.len();
    let rest = &data[start..];
    let found = if until.is_empty() {
        rest
    } else {
        rest.find(until).map_or(rest, |end| &rest[..end])
    };
    (!found.is_empty()).then_some(found)
}

fn first_match<'a>(data: &'a str, markers: &[(&str, &str)]) -> Option<&'a str> {
    markers
        .iter()
        .find_map(|(after, until)| extract_between(data, after, until))
}

/// Channel id embedded in a channel or watch page.
#[must_use]
pub fn channel_id_from_page(data: &str) -> Option<&str> {
    first_match(data, CHANNEL_ID_MARKERS)
}

/// Channel avatar url embedded in a channel or watch page.
#[must_use]
pub fn favicon_from_page(data: &str) -> Option<&str> {
    first_match(data, FAVICON_MARKERS)
}

/// Uploader display name embedded in a watch page, with JSON escapes decoded.
///
/// # Errors
/// Returns `Other` when the embedded name is not a valid JSON string body.
pub fn publisher_name_from_page(data: &str) -> Result<Option<String>, TallyError> {
    let Some(raw) = extract_between(data, AUTHOR_MARKER.0, AUTHOR_MARKER.1) else {
        return Ok(None);
    };
    serde_json::from_str::<String>(&format!("\"{raw}\""))
        .map(Some)
        .map_err(|e| TallyError::Other(format!("parsing publisher name from page: {e}")))
}
