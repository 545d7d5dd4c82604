//! Single-file book assembly
//!
//! Collects every page's Markdown, then writes them as one document ordered by
//! discovery index.

use crate::url::CanonicalUrl;
use std::fs;
use std::path::Path;

/// File name of the concatenated document
pub const AGGREGATE_FILE_NAME: &str = "full_book.md";

/// Separator placed between pages
const PAGE_SEPARATOR: &str = "\n---\n\n";

#[derive(Debug, Clone)]
struct Entry {
    order_index: usize,
    source: String,
    body: String,
}

/// Append-only log of `(source URL, markdown)` pairs, flushed once
#[derive(Debug, Default)]
pub struct AggregateDocument {
    entries: Vec<Entry>,
    flushed: bool,
}

impl AggregateDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page body; ignored once the document has been flushed
    pub fn append(&mut self, order_index: usize, source: &CanonicalUrl, body: &str) {
        if self.flushed {
            tracing::warn!("Aggregate already flushed, dropping {}", source);
            return;
        }

        self.entries.push(Entry {
            order_index,
            source: source.to_string(),
            body: body.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the document, pages sorted by discovery index
    pub fn render(&self) -> String {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.order_index);

        entries
            .iter()
            .map(|e| format!("<!-- Source: {} -->\n\n{}\n", e.source, e.body.trim_end()))
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR)
    }

    /// Writes the document to `path`, creating parent directories
    ///
    /// The first call marks the document flushed, even if the write fails.
    pub fn flush_to(&mut self, path: &Path) -> std::io::Result<bool> {
        if self.flushed {
            return Ok(false);
        }
        self.flushed = true;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        Ok(true)
    }
}
