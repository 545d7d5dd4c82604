//! Sitemap-driven bulk discovery
//!
//! Enumerates a site's pages from `sitemap.xml` without following links. A
//! sitemap index is followed one level deep. The result is untrusted: the
//! exporter canonicalizes it and re-filters it through the scope filter.
//!
//! The XML goes through the HTML parser, which keeps unknown self-closing
//! tags (`<xhtml:link/>`, `<image:image/>`) open until their parent closes.
//! A `<loc>` may therefore end up nested below a sibling, so entries are
//! matched with descendant selectors only.

use crate::crawler::document::ParsedDocument;
use crate::crawler::fetcher::Fetcher;
use crate::url::CanonicalUrl;
use crate::ExportError;
use scraper::Selector;

/// Lists every page of a site in one call
#[allow(async_fn_in_trait)]
pub trait BulkDiscovery {
    /// Returns page URLs in the order the enumeration produced them
    async fn discover_all(&self, seed: &CanonicalUrl) -> Result<Vec<String>, ExportError>;
}

/// Bulk discovery reading `<seed>/sitemap.xml`
#[derive(Debug, Clone)]
pub struct SitemapDiscovery<F> {
    fetcher: F,
}

impl<F: Fetcher> SitemapDiscovery<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    async fn fetch_sitemap(&self, url: &str) -> Result<ParsedDocument, ExportError> {
        let body = self.fetcher.fetch(url).await?;
        Ok(ParsedDocument::parse(&body))
    }
}

/// Location of the sitemap for a seed: origin, then the seed path without
/// its trailing slash, then `/sitemap.xml`
pub fn sitemap_url(seed: &CanonicalUrl) -> String {
    format!(
        "{}{}/sitemap.xml",
        seed.as_url().origin().ascii_serialization(),
        seed.path().trim_end_matches('/')
    )
}

/// Collects the text of every element matching `selector`, trimmed, in
/// document order
fn collect_locs(doc: &ParsedDocument, selector: &Selector) -> Vec<String> {
    doc.find_all(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect()
}

impl<F: Fetcher> BulkDiscovery for SitemapDiscovery<F> {
    async fn discover_all(&self, seed: &CanonicalUrl) -> Result<Vec<String>, ExportError> {
        let (Ok(page_locs), Ok(index_locs)) =
            (Selector::parse("url loc"), Selector::parse("sitemap loc"))
        else {
            return Err(ExportError::Discovery("invalid sitemap selector".to_string()));
        };

        let root = sitemap_url(seed);
        tracing::info!("Discovering pages from {}", root);
        let doc = self.fetch_sitemap(&root).await?;

        let mut pages = collect_locs(&doc, &page_locs);

        for child in collect_locs(&doc, &index_locs) {
            match self.fetch_sitemap(&child).await {
                Ok(child_doc) => pages.extend(collect_locs(&child_doc, &page_locs)),
                Err(e) => tracing::warn!("Skipping nested sitemap {}: {}", child, e),
            }
        }

        tracing::debug!("{} lists {} pages", root, pages.len());
        Ok(pages)
    }
}
