//! Request URL construction for the trending listing.

use crate::config::{Config, TimeRange};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

/// Listing endpoint without language filter or query string.
pub const TRENDING_BASE_URL: &str = "https://github.com/trending";

/// Characters left unescaped in a language segment: the JavaScript
/// `encodeURIComponent` set (so `c++` becomes `c%2B%2B`).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the listing URL for a language filter and time range.
///
/// A non-empty `language` is appended as one percent-encoded path segment.
/// The time range always goes into the `since` query parameter.
pub fn build_url(language: &str, time_range: TimeRange) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("since", time_range.as_str())
        .finish();

    if language.is_empty() {
        format!("{TRENDING_BASE_URL}?{query}")
    } else {
        format!("{TRENDING_BASE_URL}/{}?{query}", encode_segment(language))
    }
}

/// Percent-encode one path segment.
///
/// A segment made only of dots would be read as `.` or `..` and dropped
/// from the path, so its dots are escaped as well.
fn encode_segment(segment: &str) -> String {
    if segment.chars().all(|c| c == '.') {
        return "%2E".repeat(segment.len());
    }
    utf8_percent_encode(segment, COMPONENT).to_string()
}

/// Build the listing URL for a resolved [`Config`].
pub fn build_url_for(config: &Config) -> String {
    build_url(&config.language, config.time_range)
}
