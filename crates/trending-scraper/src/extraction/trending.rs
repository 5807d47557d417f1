//! Field rules for one trending entry.
//!
//! Every rule degrades to its default (empty string or 0) when the markup it
//! looks for is missing. An entry is never dropped because of a bad field.

use super::dom::{parse_document, ElementNode};
use super::normalize::{parse_count, parse_embedded_count};
use crate::record::{repo_url, TrendingRecord};
use tracing::debug;

/// One repository in the rendered listing.
pub const ENTRY_SELECTOR: &str = "article.Box-row";

const TITLE_LINK_SELECTOR: &str = "h2 a";
const DESCRIPTION_SELECTOR: &str = "p";
const LANGUAGE_SELECTOR: &str = "[itemprop=\"programmingLanguage\"]";
const STAT_LINK_SELECTOR: &str = "a.Link--muted";
const STAT_ICON_SELECTOR: &str = "svg use";
const STARS_TODAY_SELECTOR: &str = "span.d-inline-block.float-sm-right";

/// Extract one record per entry, ranked by position.
pub fn extract_records<N: ElementNode>(entries: &[N]) -> Vec<TrendingRecord> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| extract_entry(entry, index as u32 + 1))
        .collect()
}

/// Parse a serialized rendered page and extract all entries from it.
pub fn extract_from_html(html: &str) -> Vec<TrendingRecord> {
    let document = parse_document(html);
    let entries = document.root_element().select_all(ENTRY_SELECTOR);
    debug!("found {} entry elements", entries.len());
    extract_records(&entries)
}

/// Split a repository identifier into `(author, name, full_name)`.
///
/// `href` is the title link target. One leading `/` is removed and the rest
/// trimmed. Without a `/` separator both author and name are empty and
/// `full_name` keeps the raw value. Extra segments after the name are
/// ignored.
pub fn split_full_name(href: &str) -> (String, String, String) {
    let full_name = href.strip_prefix('/').unwrap_or(href).trim().to_string();

    let mut parts = full_name.split('/');
    let (author, name) = match (parts.next(), parts.next()) {
        (Some(author), Some(name)) => (author.to_string(), name.to_string()),
        _ => (String::new(), String::new()),
    };

    (author, name, full_name)
}

fn extract_entry<N: ElementNode>(entry: &N, rank: u32) -> TrendingRecord {
    let href = entry
        .select_first(TITLE_LINK_SELECTOR)
        .and_then(|a| a.attr("href").map(str::to_string))
        .unwrap_or_default();
    if href.is_empty() {
        debug!(rank, "entry has no title link");
    }
    let (author, name, full_name) = split_full_name(&href);

    let description = trimmed_text(entry, DESCRIPTION_SELECTOR);
    let language = trimmed_text(entry, LANGUAGE_SELECTOR);
    let (stars, forks) = extract_stats(entry);

    let stars_today = entry
        .select_first(STARS_TODAY_SELECTOR)
        .map(|span| parse_embedded_count(&span.text()))
        .unwrap_or(0);

    let url = repo_url(&full_name);

    TrendingRecord {
        rank,
        author,
        name,
        full_name,
        url,
        description,
        language,
        stars,
        forks,
        stars_today,
    }
}

fn trimmed_text<N: ElementNode>(entry: &N, selector: &str) -> String {
    entry
        .select_first(selector)
        .map(|el| el.text().trim().to_string())
        .unwrap_or_default()
}

/// Classify the muted stat links by their icon reference.
///
/// A reference containing `star` sets stars and one containing `fork` sets
/// forks; both checks apply to every link and a later link overwrites an
/// earlier one. Links with neither are ignored.
fn extract_stats<N: ElementNode>(entry: &N) -> (u64, u64) {
    let mut stars = 0;
    let mut forks = 0;

    for link in entry.select_all(STAT_LINK_SELECTOR) {
        let icon = link
            .select_first(STAT_ICON_SELECTOR)
            .and_then(|u| u.attr("href").map(str::to_string))
            .unwrap_or_default();
        if icon.is_empty() {
            continue;
        }

        let count = parse_count(link.text().trim());
        if icon.contains("star") {
            stars = count;
        }
        if icon.contains("fork") {
            forks = count;
        }
    }

    (stars, forks)
}
