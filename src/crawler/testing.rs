//! In-memory collaborators shared by the crawler unit tests

use crate::crawler::fetcher::Fetcher;
use crate::output::{ArtifactReport, ExportedPage, OutputSink};
use crate::FetchError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Serves canned bodies by URL and counts every request
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    hits: RefCell<HashMap<String, usize>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.borrow().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.borrow().values().sum()
    }
}

impl Fetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        *self.hits.borrow_mut().entry(url.to_string()).or_insert(0) += 1;
        self.pages
            .get(url)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Records pages instead of writing them
#[derive(Debug, Default)]
pub struct MemorySink {
    /// (order index, url, relative path, markdown)
    pub pages: Vec<(usize, String, String, String)>,
    pub finished: bool,
}

impl MemorySink {
    pub fn urls(&self) -> Vec<&str> {
        self.pages.iter().map(|(_, url, _, _)| url.as_str()).collect()
    }
}

impl OutputSink for MemorySink {
    fn write_page(&mut self, page: &ExportedPage<'_>) -> ArtifactReport {
        self.pages.push((
            page.order_index,
            page.url.to_string(),
            page.relative_path.to_string(),
            page.content.markdown.clone(),
        ));
        ArtifactReport {
            written: vec![PathBuf::from(page.relative_path.as_str())],
            ..ArtifactReport::default()
        }
    }

    fn finish(&mut self) -> crate::Result<Option<PathBuf>> {
        self.finished = true;
        Ok(None)
    }
}
