//! The canonical record produced for each trending repository.

use serde::{Deserialize, Serialize};

/// Base address every repository URL is built from.
pub const REPO_BASE_URL: &str = "https://github.com";

/// Column order used by every tabular export.
pub const CSV_FIELDS: [&str; 10] = [
    "rank",
    "author",
    "name",
    "fullName",
    "url",
    "description",
    "language",
    "stars",
    "forks",
    "starsToday",
];

/// One entry of the trending listing.
///
/// Field order matches [`CSV_FIELDS`]; serde serializes struct fields in
/// declaration order, so JSON and CSV share the same layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingRecord {
    /// 1-based position in the rendered listing.
    pub rank: u32,
    pub author: String,
    pub name: String,
    /// `author/name` exactly as found in the title link.
    pub full_name: String,
    pub url: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub stars_today: u64,
}

/// Build the absolute repository address for a `author/name` identifier.
pub fn repo_url(full_name: &str) -> String {
    format!("{REPO_BASE_URL}/{full_name}")
}
