//! Parsed HTML document
//!
//! A thin typed wrapper over `scraper::Html` exposing the only structural
//! queries the exporter needs: find-first, find-all, and descendant removal.

use scraper::{ElementRef, Html, Selector};

/// A parsed page, queryable by CSS selector
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parses raw response bytes; invalid UTF-8 is replaced, never rejected
    pub fn parse(bytes: &[u8]) -> Self {
        Self::parse_str(&String::from_utf8_lossy(bytes))
    }

    pub fn parse_str(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// First element matching `selector` in document order
    pub fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// All elements matching `selector` in document order
    pub fn find_all<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> {
        self.html.select(selector)
    }

    /// Detaches every descendant of the first `container` match that matches
    /// `noise`, then returns the container's serialized markup
    ///
    /// Returns `None` when nothing matches `container`.
    pub fn strip_and_serialize(&mut self, container: &Selector, noise: &Selector) -> Option<String> {
        let root = self.find_first(container)?;
        let root_id = root.id();
        let doomed: Vec<_> = root.select(noise).map(|el| el.id()).collect();

        for id in doomed {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }

        self.html
            .tree
            .get(root_id)
            .and_then(ElementRef::wrap)
            .map(|el| el.html())
    }
}
