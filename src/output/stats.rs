//! Export run statistics
//!
//! Tracks what happened to every page of a run and renders the end-of-run
//! summary the CLI prints.

use crate::state::PageState;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// How the list of pages was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    /// Bulk enumeration (sitemap)
    Bulk,
    /// Navigation-link traversal from the seed
    Traversal,
}

impl fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bulk => write!(f, "sitemap"),
            Self::Traversal => write!(f, "navigation traversal"),
        }
    }
}

/// A page that did not make it into the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    pub url: String,
    pub state: PageState,
    pub reason: String,
}

/// Outcome of one export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub seed: String,
    pub strategy: DiscoveryStrategy,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages whose content reached the sink, in discovery order
    pub exported: Vec<String>,

    /// Pages skipped, with the reason
    pub skipped: Vec<SkippedPage>,

    /// Artifacts persisted (the aggregate document not included)
    pub artifacts_written: usize,

    /// Artifacts that failed to persist
    pub write_failures: usize,

    /// The concatenated document, in single-file mode
    pub aggregate_path: Option<PathBuf>,

    /// True when the run ended before its frontier was drained
    pub stopped_early: bool,
}

impl ExportSummary {
    /// Creates an empty summary, stamped with the current time
    pub fn new(seed: impl Into<String>, strategy: DiscoveryStrategy) -> Self {
        Self {
            seed: seed.into(),
            strategy,
            started_at: Utc::now(),
            finished_at: None,
            exported: Vec::new(),
            skipped: Vec::new(),
            artifacts_written: 0,
            write_failures: 0,
            aggregate_path: None,
            stopped_early: false,
        }
    }

    pub fn record_exported(&mut self, url: impl Into<String>) {
        self.exported.push(url.into());
    }

    pub fn record_skipped(&mut self, url: impl Into<String>, state: PageState, reason: impl Into<String>) {
        self.skipped.push(SkippedPage {
            url: url.into(),
            state,
            reason: reason.into(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn pages_exported(&self) -> usize {
        self.exported.len()
    }

    /// Skipped page counts keyed by state
    pub fn skipped_by_state(&self) -> BTreeMap<PageState, usize> {
        let mut counts = BTreeMap::new();
        for page in &self.skipped {
            *counts.entry(page.state).or_insert(0) += 1;
        }
        counts
    }

    /// A run that exported nothing is a failure even though no error escaped
    pub fn is_failure(&self) -> bool {
        self.exported.is_empty()
    }

    /// True when some pages were exported and some were not
    pub fn is_partial(&self) -> bool {
        !self.exported.is_empty()
            && (self.skipped.iter().any(|p| p.state.is_error()) || self.write_failures > 0)
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Formats the summary for display
pub fn format_summary(summary: &ExportSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Export Summary ===\n\n");
    out.push_str(&format!("Seed: {}\n", summary.seed));
    out.push_str(&format!("Discovery: {}\n", summary.strategy));
    out.push_str(&format!("Started: {}\n", summary.started_at.to_rfc3339()));
    if let Some(duration) = summary.duration_seconds() {
        out.push_str(&format!("Duration: {}s\n", duration));
    }
    out.push('\n');

    out.push_str(&format!("Pages exported: {}\n", summary.pages_exported()));
    out.push_str(&format!("Artifacts written: {}\n", summary.artifacts_written));
    if summary.write_failures > 0 {
        out.push_str(&format!("Artifact write failures: {}\n", summary.write_failures));
    }
    if let Some(path) = &summary.aggregate_path {
        out.push_str(&format!("Single-file book: {}\n", path.display()));
    }

    let by_state = summary.skipped_by_state();
    if !by_state.is_empty() {
        out.push_str("\nSkipped pages:\n");
        for (state, count) in &by_state {
            out.push_str(&format!("  {}: {}\n", state, count));
        }
        for page in summary.skipped.iter().filter(|p| p.state.is_error()) {
            out.push_str(&format!("  - {} ({})\n", page.url, page.reason));
        }
    }

    if summary.stopped_early {
        out.push_str("\nRun stopped before all pages were visited.\n");
    }

    if summary.is_failure() {
        out.push_str("\nResult: no pages exported\n");
    } else if summary.is_partial() {
        out.push_str("\nResult: partial export\n");
    }

    out
}

/// Prints the summary to stdout
pub fn print_summary(summary: &ExportSummary) {
    print!("{}", format_summary(summary));
}
