//! HTML to Markdown rendering
//!
//! Rendering is a pure function of the extracted markup: it knows nothing
//! about URLs or the filesystem.

/// Converts a content fragment's markup into Markdown
pub trait MarkdownRenderer {
    fn render(&self, html: &str) -> String;
}

/// Renderer backed by the `html2md` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2MdRenderer;

impl MarkdownRenderer for Html2MdRenderer {
    fn render(&self, html: &str) -> String {
        html2md::parse_html(html).trim().to_string()
    }
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, html: &str) -> String {
        self(html)
    }
}
