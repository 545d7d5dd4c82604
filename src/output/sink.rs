//! Filesystem output sink
//!
//! Lays artifacts out as:
//!
//! ```text
//! <root>/<host>/html/<relative path>.html
//! <root>/<host>/md/<relative path>.md
//! <root>/<host>/full_book.md          (single-file mode)
//! ```

use crate::config::OutputFormat;
use crate::output::aggregate::{AggregateDocument, AGGREGATE_FILE_NAME};
use crate::output::traits::{ArtifactFormat, ArtifactReport, ExportedPage, OutputSink};
use crate::ExportError;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes artifacts under a per-host directory
#[derive(Debug)]
pub struct FsSink {
    host_root: PathBuf,
    format: OutputFormat,
    single_file: bool,
    aggregate: AggregateDocument,
}

impl FsSink {
    /// Creates a sink writing under `<output_root>/<host>`
    ///
    /// Nothing touches the filesystem until the first artifact is written.
    pub fn new(output_root: &Path, host: &str, format: OutputFormat, single_file: bool) -> Self {
        Self {
            host_root: output_root.join(host),
            format,
            single_file,
            aggregate: AggregateDocument::new(),
        }
    }

    /// The `<output_root>/<host>` directory
    pub fn host_root(&self) -> &Path {
        &self.host_root
    }

    /// Full path of an artifact for `page` in `format`
    pub fn artifact_path(&self, page: &ExportedPage<'_>, format: ArtifactFormat) -> PathBuf {
        self.host_root
            .join(format.directory())
            .join(page.relative_path.with_extension(format.extension()))
    }

    pub fn aggregate_path(&self) -> PathBuf {
        self.host_root.join(AGGREGATE_FILE_NAME)
    }

    fn write_artifact(&self, path: &Path, body: &str) -> Result<(), ExportError> {
        let to_error = |source: std::io::Error| ExportError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        fs::write(path, body).map_err(to_error)
    }
}

impl OutputSink for FsSink {
    fn write_page(&mut self, page: &ExportedPage<'_>) -> ArtifactReport {
        let mut report = ArtifactReport::default();

        let mut targets = Vec::new();
        if self.format.wants_html() {
            targets.push((ArtifactFormat::Html, page.content.html.as_str()));
        }
        if self.format.wants_markdown() {
            if self.single_file {
                self.aggregate
                    .append(page.order_index, page.url, &page.content.markdown);
                report.aggregated += 1;
            } else {
                targets.push((ArtifactFormat::Markdown, page.content.markdown.as_str()));
            }
        }

        for (format, body) in targets {
            let path = self.artifact_path(page, format);
            match self.write_artifact(&path, body) {
                Ok(()) => {
                    tracing::debug!("Wrote {}", path.display());
                    report.written.push(path);
                }
                Err(e) => {
                    tracing::warn!("Skipping {} artifact for {}: {}", format.extension(), page.url, e);
                    report.failures.push(e);
                }
            }
        }

        report
    }

    fn finish(&mut self) -> crate::Result<Option<PathBuf>> {
        if !self.single_file || !self.format.wants_markdown() {
            return Ok(None);
        }

        if self.aggregate.is_empty() {
            tracing::warn!("No pages collected, not writing {}", AGGREGATE_FILE_NAME);
            return Ok(None);
        }

        let path = self.aggregate_path();
        match self.aggregate.flush_to(&path) {
            Ok(true) => {
                tracing::info!(
                    "Wrote {} pages to {}",
                    self.aggregate.len(),
                    path.display()
                );
                Ok(Some(path))
            }
            Ok(false) => Ok(None),
            Err(source) => Err(ExportError::Write { path, source }),
        }
    }
}
