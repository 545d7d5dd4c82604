//! Navigation link discovery
//!
//! Only anchors inside navigation containers are followed; links in the
//! content region are not part of the site's table of contents.

use crate::crawler::document::ParsedDocument;
use crate::url::{canonicalize_against, is_in_scope, CanonicalUrl, ScopeConfig};
use scraper::Selector;
use std::collections::HashSet;

/// Elements treated as navigation containers
pub const NAVIGATION_SELECTOR: &str = "nav, aside, [role=\"navigation\"]";

/// Returns the in-scope links of `doc`'s navigation regions
///
/// Containers are scanned in document order and anchors within each in
/// document order. Each link is resolved against `page`, canonicalized, kept
/// only if in scope, and kept only at its first occurrence.
///
/// A page without navigation containers yields an empty list.
///
/// # Link Extraction Rules
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:`, `data:` links
/// - Fragment-only links (same page anchors)
/// - `<a href="..." download>`
/// - Hrefs that fail to resolve (logged and skipped)
pub fn discover_links(
    doc: &ParsedDocument,
    page: &CanonicalUrl,
    scope: &ScopeConfig,
) -> Vec<CanonicalUrl> {
    let (Ok(containers), Ok(anchors)) = (
        Selector::parse(NAVIGATION_SELECTOR),
        Selector::parse("a[href]"),
    ) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for container in doc.find_all(&containers) {
        for anchor in container.select(&anchors) {
            if anchor.value().attr("download").is_some() {
                continue;
            }

            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            if is_excluded_href(href) {
                continue;
            }

            let link = match canonicalize_against(href, page) {
                Ok(link) => link,
                Err(e) => {
                    tracing::warn!("Skipping malformed link {:?} on {}: {}", href, page, e);
                    continue;
                }
            };

            if !is_in_scope(&link, scope) {
                tracing::debug!("Skipping out-of-scope link {} on {}", link, page);
                continue;
            }

            if seen.insert(link.clone()) {
                links.push(link);
            }
        }
    }

    links
}

/// Checks for hrefs that never point at another page
fn is_excluded_href(href: &str) -> bool {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();

    href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
}
