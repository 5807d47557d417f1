//! Turn a rendered trending page into typed records.
//!
//! Extraction is written against the [`ElementNode`] trait rather than a
//! browser binding, so the same rules run over any parsed document.

pub mod dom;
pub mod normalize;
pub mod trending;

pub use dom::{parse_document, ElementNode};
pub use normalize::{parse_count, parse_embedded_count};
pub use trending::{extract_from_html, extract_records, split_full_name, ENTRY_SELECTOR};
