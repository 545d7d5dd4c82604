//! Output module for writing exported pages
//!
//! This module handles:
//! - Mapping page URLs to stable, collision-free relative paths
//! - Writing per-page HTML and Markdown artifacts
//! - Assembling the single-file Markdown book
//! - Recording run statistics

mod aggregate;
mod path_mapper;
mod sink;
pub mod stats;
mod traits;

pub use aggregate::{AggregateDocument, AGGREGATE_FILE_NAME};
pub use path_mapper::{map_path, PathRegistry, RelativePath};
pub use sink::FsSink;
pub use stats::{format_summary, print_summary, DiscoveryStrategy, ExportSummary, SkippedPage};
pub use traits::{ArtifactFormat, ArtifactReport, ExportedPage, OutputSink};
