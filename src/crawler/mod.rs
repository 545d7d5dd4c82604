//! Crawler module for page discovery and processing
//!
//! This module contains the core export logic, including:
//! - The fetch collaborator and its HTTP implementation
//! - HTML parsing, content extraction and navigation link discovery
//! - Sitemap bulk discovery and depth-first navigation traversal
//! - Discovery strategy selection for a whole run

mod coordinator;
mod document;
mod extract;
mod fetcher;
mod links;
mod render;
mod sitemap;
mod traversal;

#[cfg(test)]
mod testing;

pub use coordinator::{export, select_bulk_pages, BulkSelection, Exporter};
pub use document::ParsedDocument;
pub use extract::{extract_content, ContentNode, CONTENT_SELECTORS, NOISE_SELECTOR};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use links::{discover_links, NAVIGATION_SELECTOR};
pub use render::{Html2MdRenderer, MarkdownRenderer};
pub use sitemap::{sitemap_url, BulkDiscovery, SitemapDiscovery};
pub use traversal::{PageExporter, RunLimits, TraversalEngine, Visit};
