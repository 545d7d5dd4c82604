//! Output sink trait and artifact types
//!
//! This module defines the interface the exporter routes accepted pages
//! through, and the data describing what a sink produced.

use crate::crawler::ContentNode;
use crate::output::path_mapper::RelativePath;
use crate::url::CanonicalUrl;
use std::path::PathBuf;

/// Artifact formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFormat {
    Html,
    Markdown,
}

impl ArtifactFormat {
    /// Directory under the host root holding artifacts of this format
    pub fn directory(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

/// One accepted page, ready to be written
#[derive(Debug, Clone)]
pub struct ExportedPage<'a> {
    /// Position in discovery order, starting at 0
    pub order_index: usize,
    pub url: &'a CanonicalUrl,
    pub relative_path: &'a RelativePath,
    pub content: &'a ContentNode,
}

/// What a sink did with one page
#[derive(Debug, Default)]
pub struct ArtifactReport {
    /// Artifacts persisted, as full paths
    pub written: Vec<PathBuf>,

    /// Markdown bodies queued for the aggregate document
    pub aggregated: usize,

    /// Artifacts that failed to persist
    pub failures: Vec<crate::ExportError>,
}

impl ArtifactReport {
    /// True when at least one artifact was written or aggregated
    pub fn any_success(&self) -> bool {
        !self.written.is_empty() || self.aggregated > 0
    }
}

/// Destination for exported pages
///
/// Pages arrive one at a time from a single writer. A failed artifact must
/// not affect artifacts already written or the aggregate collected so far.
pub trait OutputSink {
    /// Persists (or queues) the artifacts of one page
    fn write_page(&mut self, page: &ExportedPage<'_>) -> ArtifactReport;

    /// Flushes any deferred output; called exactly once at the end of a run
    ///
    /// Returns the path of the aggregate document, if one was written.
    fn finish(&mut self) -> crate::Result<Option<PathBuf>>;
}
