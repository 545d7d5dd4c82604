//! Content region extraction
//!
//! Locates a page's primary, reader-facing content and strips the noise
//! inside it. The location policy is an ordered list of selector strategies:
//! the first one that matches wins. When none match the page is skipped. The
//! whole `<body>` is never used as a stand-in.

use crate::crawler::document::ParsedDocument;
use crate::crawler::render::MarkdownRenderer;
use scraper::Selector;

/// Content-region selectors, in priority order
pub const CONTENT_SELECTORS: &[&str] = &[
    // Semantic main region
    "main",
    "[role=\"main\"]",
    "article",
    // Legacy GitBook page wrapper
    "div.page-inner",
    // GitBook search results container
    "div#book-search-results",
];

/// Elements removed from inside the content region before rendering
pub const NOISE_SELECTOR: &str = "script, style, nav, noscript";

/// The extracted content region of one page, in both renderings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    /// Which entry of `CONTENT_SELECTORS` located the region
    pub matched_selector: &'static str,

    /// Serialized markup of the cleaned region
    pub html: String,

    /// Markdown rendering of the same region
    pub markdown: String,
}

/// Extracts the content region of `doc`
///
/// # Returns
///
/// * `Some(ContentNode)` - The first selector strategy that matched, cleaned
///   of script/style/nav descendants and rendered both ways
/// * `None` - No strategy matched; the caller skips the page
pub fn extract_content(
    doc: &mut ParsedDocument,
    renderer: &impl MarkdownRenderer,
) -> Option<ContentNode> {
    let noise = Selector::parse(NOISE_SELECTOR).ok()?;

    for &candidate in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };

        if let Some(html) = doc.strip_and_serialize(&selector, &noise) {
            let markdown = renderer.render(&html);
            return Some(ContentNode {
                matched_selector: candidate,
                html,
                markdown,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::render::Html2MdRenderer;

    fn extract(html: &str) -> Option<ContentNode> {
        let mut doc = ParsedDocument::parse_str(html);
        extract_content(&mut doc, &Html2MdRenderer)
    }

    #[test]
    fn test_main_region() {
        let content = extract(
            "<html><body><nav><a href='/page1'>P1</a></nav><main><h1>Main Page</h1></main></body></html>",
        )
        .unwrap();
        assert_eq!(content.matched_selector, "main");
        assert_eq!(content.html, "<main><h1>Main Page</h1></main>");
        assert!(content.markdown.contains("Main Page"));
        assert!(!content.markdown.contains("P1"));
    }

    #[test]
    fn test_main_preferred_over_article() {
        let content =
            extract("<article><p>Side story</p></article><main><p>Primary</p></main>").unwrap();
        assert_eq!(content.matched_selector, "main");
        assert!(content.html.contains("Primary"));
    }

    #[test]
    fn test_role_main() {
        let content = extract("<div role=\"main\"><p>Body</p></div>").unwrap();
        assert_eq!(content.matched_selector, "[role=\"main\"]");
    }

    #[test]
    fn test_article_fallback() {
        let content = extract("<div><article><p>Story</p></article></div>").unwrap();
        assert_eq!(content.matched_selector, "article");
    }

    #[test]
    fn test_page_inner_fallback() {
        let content = extract("<div class=\"book\"><div class=\"page-inner\"><p>Legacy</p></div></div>").unwrap();
        assert_eq!(content.matched_selector, "div.page-inner");
        assert!(content.markdown.contains("Legacy"));
    }

    #[test]
    fn test_search_results_fallback() {
        let content = extract("<div id=\"book-search-results\"><p>Found</p></div>").unwrap();
        assert_eq!(content.matched_selector, "div#book-search-results");
    }

    #[test]
    fn test_no_region_is_none() {
        assert!(extract("<html><body><div><p>Just a body</p></div></body></html>").is_none());
    }

    #[test]
    fn test_noise_stripped_from_both_views() {
        let content = extract(
            "<main><style>h1{}</style><h1>Title</h1><script>track()</script><nav><a href='/x'>Menu</a></nav><p>Text</p></main>",
        )
        .unwrap();
        assert_eq!(content.html, "<main><h1>Title</h1><p>Text</p></main>");
        assert!(!content.markdown.contains("track"));
        assert!(!content.markdown.contains("Menu"));
    }

    #[test]
    fn test_injected_renderer() {
        let mut doc = ParsedDocument::parse_str("<main><p>x</p></main>");
        let content = extract_content(&mut doc, &|html: &str| format!("len={}", html.len())).unwrap();
        assert_eq!(content.markdown, "len=21");
    }
}
