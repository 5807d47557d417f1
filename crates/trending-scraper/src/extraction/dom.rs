//! Element-node abstraction over parsed HTML.

use scraper::{ElementRef, Html, Selector};

/// The queries extraction needs from a document element.
///
/// Queries never fail: an invalid selector or a missing element yields
/// `None` or an empty list.
pub trait ElementNode: Sized {
    /// Value of an attribute, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenated text of all descendant text nodes.
    fn text(&self) -> String;

    /// First descendant matching a CSS selector, in document order.
    fn select_first(&self, selector: &str) -> Option<Self>;

    /// All descendants matching a CSS selector, in document order.
    fn select_all(&self, selector: &str) -> Vec<Self>;
}

impl<'a> ElementNode for ElementRef<'a> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn select_first(&self, selector: &str) -> Option<Self> {
        let sel = Selector::parse(selector).ok()?;
        let first = self.select(&sel).next();
        first
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        let all: Vec<Self> = self.select(&sel).collect();
        all
    }
}

/// Parse a full HTML document (as serialized from the rendered DOM).
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}
