//! Numeric normalization for count strings scraped from the listing.
//!
//! Nothing here returns an error: missing or unparseable text is 0.

use regex::Regex;
use std::sync::OnceLock;

/// Parse a localized count such as `"1,234"`.
///
/// Thousands separators are removed, leading whitespace is skipped, and the
/// leading run of ASCII digits is taken (`"12k"` is 12). No digits, or a
/// value too large for `u64`, gives 0.
pub fn parse_count(text: &str) -> u64 {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let digits: String = cleaned
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u64>().unwrap_or(0)
}

/// Parse the first run of digits (with separators) found anywhere in `text`,
/// e.g. `"1,024 stars today"` is 1024.
pub fn parse_embedded_count(text: &str) -> u64 {
    static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
    let re = DIGIT_RUN.get_or_init(|| Regex::new(r"[0-9,]+").expect("digit-run regex is valid"));

    re.find(text).map(|m| parse_count(m.as_str())).unwrap_or(0)
}
