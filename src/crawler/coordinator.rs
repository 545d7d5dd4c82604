//! Export coordinator - discovery strategy selection and the export run
//!
//! This module ties the collaborators together:
//! - Validating the configuration and deriving the scope from the seed
//! - Asking bulk discovery (the sitemap) for the page list first
//! - Falling back to navigation traversal when that fails or finds nothing
//! - Re-filtering bulk results through the scope filter before export

use crate::config::{validate, Config};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::render::{Html2MdRenderer, MarkdownRenderer};
use crate::crawler::sitemap::{BulkDiscovery, SitemapDiscovery};
use crate::crawler::traversal::{PageExporter, RunLimits, TraversalEngine};
use crate::output::{DiscoveryStrategy, ExportSummary, FsSink, OutputSink};
use crate::state::PageState;
use crate::url::{canonicalize, is_in_scope, CanonicalUrl, ScopeConfig};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Bulk discovery results split by the scope filter
#[derive(Debug, Default)]
pub struct BulkSelection {
    /// Canonical, deduplicated, in-scope pages in enumeration order
    pub in_scope: Vec<CanonicalUrl>,

    /// Canonical forms of the pages the scope filter rejected
    pub out_of_scope: Vec<CanonicalUrl>,
}

/// Canonicalizes and scope-filters a raw bulk discovery result
///
/// Unparseable entries are dropped; duplicates keep their first position.
pub fn select_bulk_pages(raw: &[String], scope: &ScopeConfig) -> BulkSelection {
    let mut seen = HashSet::new();
    let mut selection = BulkSelection::default();

    for entry in raw {
        let url = match canonicalize(entry, None) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Ignoring sitemap entry {:?}: {}", entry, e);
                continue;
            }
        };

        if !seen.insert(url.clone()) {
            continue;
        }

        if is_in_scope(&url, scope) {
            selection.in_scope.push(url);
        } else {
            selection.out_of_scope.push(url);
        }
    }

    selection
}

/// Main export structure
pub struct Exporter<F, B> {
    config: Config,
    seed: CanonicalUrl,
    scope: ScopeConfig,
    fetcher: F,
    discovery: Option<B>,
    stop: Arc<AtomicBool>,
}

impl Exporter<HttpFetcher, SitemapDiscovery<HttpFetcher>> {
    /// Creates an exporter with the HTTP fetcher and sitemap discovery
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Exporter)` - Configuration valid, HTTP client built
    /// * `Err(ExportError)` - Invalid configuration or seed URL
    pub fn new(config: Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        let discovery = config
            .discovery
            .use_sitemap
            .then(|| SitemapDiscovery::new(fetcher.clone()));
        Self::with_collaborators(config, fetcher, discovery)
    }
}

impl<F, B> Exporter<F, B>
where
    F: Fetcher,
    B: BulkDiscovery,
{
    /// Creates an exporter around explicit collaborators
    ///
    /// `discovery: None` goes straight to navigation traversal.
    pub fn with_collaborators(
        config: Config,
        fetcher: F,
        discovery: Option<B>,
    ) -> crate::Result<Self> {
        validate(&config)?;

        let seed = canonicalize(&config.seed_url, None)?;
        let scope = match &config.discovery.scope_prefix {
            Some(prefix) => ScopeConfig::with_prefix(&seed, prefix),
            None => ScopeConfig::from_seed(&seed),
        };

        Ok(Self {
            config,
            seed,
            scope,
            fetcher,
            discovery,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn seed(&self) -> &CanonicalUrl {
        &self.seed
    }

    pub fn scope(&self) -> &ScopeConfig {
        &self.scope
    }

    /// Flag that, once set, stops the run before its next page
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Runs the export into `<output directory>/<host>/`
    pub async fn run(self) -> ExportSummary {
        let sink = FsSink::new(
            Path::new(&self.config.output.directory),
            &self.seed.host(),
            self.config.output.format,
            self.config.output.single_file,
        );
        tracing::info!("Writing to {}", sink.host_root().display());
        self.run_with(Html2MdRenderer, sink).await
    }

    /// Runs the export with an explicit renderer and sink
    pub async fn run_with<R, S>(self, renderer: R, sink: S) -> ExportSummary
    where
        R: MarkdownRenderer,
        S: OutputSink,
    {
        tracing::info!(
            "Exporting {} (scope: {}{})",
            self.seed,
            self.scope.host,
            self.scope.path_prefix
        );

        let limits = RunLimits {
            delay: self.config.fetch.delay(),
            max_pages: self.config.discovery.max_pages,
            stop: Arc::clone(&self.stop),
        };

        let selection = self.discover_bulk().await;

        let summary = match selection {
            Some(selection) => {
                let mut exporter = PageExporter::new(
                    &self.fetcher,
                    renderer,
                    sink,
                    self.scope.clone(),
                    limits,
                    ExportSummary::new(self.seed.as_str(), DiscoveryStrategy::Bulk),
                );
                for url in &selection.out_of_scope {
                    tracing::debug!("Sitemap entry {} is out of scope", url);
                    exporter.summary_mut().record_skipped(
                        url.as_str(),
                        PageState::OutOfScope,
                        "outside the export scope",
                    );
                }
                export_listed(&mut exporter, &selection.in_scope).await;
                exporter.finish()
            }
            None => {
                let mut exporter = PageExporter::new(
                    &self.fetcher,
                    renderer,
                    sink,
                    self.scope.clone(),
                    limits,
                    ExportSummary::new(self.seed.as_str(), DiscoveryStrategy::Traversal),
                );
                TraversalEngine::new(self.seed.clone())
                    .run(&mut exporter)
                    .await;
                exporter.finish()
            }
        };

        tracing::info!(
            "Export finished: {} pages exported, {} skipped",
            summary.pages_exported(),
            summary.skipped.len()
        );
        summary
    }

    /// Asks bulk discovery for the page list
    ///
    /// `None` selects navigation traversal: discovery disabled or failed, or
    /// nothing it listed lies in scope.
    async fn discover_bulk(&self) -> Option<BulkSelection> {
        let discovery = self.discovery.as_ref()?;

        let raw = match discovery.discover_all(&self.seed).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("{}, falling back to navigation traversal", e);
                return None;
            }
        };

        let selection = select_bulk_pages(&raw, &self.scope);
        if selection.in_scope.is_empty() {
            tracing::info!(
                "Sitemap listed {} pages, none in scope; falling back to navigation traversal",
                raw.len()
            );
            return None;
        }

        tracing::info!(
            "Found {} pages ({} out of scope). Starting export...",
            selection.in_scope.len(),
            selection.out_of_scope.len()
        );
        Some(selection)
    }
}

/// Exports a bulk-discovered page list in order
async fn export_listed<F, R, S>(exporter: &mut PageExporter<F, R, S>, pages: &[CanonicalUrl])
where
    F: Fetcher,
    R: MarkdownRenderer,
    S: OutputSink,
{
    let total = pages.len();
    for (i, url) in pages.iter().enumerate() {
        if exporter.should_stop() {
            tracing::info!("Stopping with {} pages left", total - i);
            exporter.mark_stopped_early();
            break;
        }
        tracing::info!("[{}/{}] Processing {}", i + 1, total, url);
        exporter.visit(url).await;
    }
}

/// Runs a complete export with the default collaborators
///
/// # Example
///
/// ```no_run
/// use gitbook_export::{export, Config};
///
/// # async fn run() -> gitbook_export::Result<()> {
/// let summary = export(Config::new("https://docs.example.com/")).await?;
/// println!("{} pages exported", summary.pages_exported());
/// # Ok(())
/// # }
/// ```
pub async fn export(config: Config) -> crate::Result<ExportSummary> {
    Ok(Exporter::new(config)?.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::testing::{MapFetcher, MemorySink};
    use crate::ExportError;

    enum StubDiscovery {
        Fails,
        Lists(Vec<&'static str>),
    }

    impl BulkDiscovery for StubDiscovery {
        async fn discover_all(&self, _seed: &CanonicalUrl) -> crate::Result<Vec<String>> {
            match self {
                Self::Fails => Err(ExportError::Discovery("no sitemap".to_string())),
                Self::Lists(urls) => Ok(urls.iter().map(|u| u.to_string()).collect()),
            }
        }
    }

    fn config(seed: &str) -> Config {
        let mut config = Config::new(seed);
        config.fetch.delay_ms = 0;
        config
    }

    fn site() -> MapFetcher {
        MapFetcher::new()
            .page(
                "https://example.com/docs/",
                "<nav><a href=\"/docs/a\">A</a></nav><main><h1>Docs</h1></main>",
            )
            .page("https://example.com/docs/a", "<main><h1>A</h1></main>")
            .page("https://example.com/docs/b", "<main><h1>B</h1></main>")
            .page("https://example.com/blog/post", "<main><h1>Blog</h1></main>")
    }

    async fn run(
        fetcher: &MapFetcher,
        discovery: Option<StubDiscovery>,
    ) -> (ExportSummary, Vec<String>) {
        let exporter =
            Exporter::with_collaborators(config("https://example.com/docs/"), fetcher, discovery)
                .unwrap();

        let summary = exporter.run_with(Html2MdRenderer, MemorySink::default()).await;
        let exported = summary.exported.clone();
        (summary, exported)
    }

    #[test]
    fn test_select_bulk_pages() {
        let scope = ScopeConfig::new("example.com", "/docs");
        let raw: Vec<String> = [
            "https://example.com/docs/b",
            "https://example.com/docs/a?utm=1",
            "https://example.com/blog/post",
            "not a url",
            "https://example.com/docs/b#again",
            "https://example.com/docs/a",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let selection = select_bulk_pages(&raw, &scope);
        let in_scope: Vec<&str> = selection.in_scope.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            in_scope,
            vec!["https://example.com/docs/b", "https://example.com/docs/a"]
        );
        assert_eq!(selection.out_of_scope.len(), 1);
        assert_eq!(selection.out_of_scope[0].as_str(), "https://example.com/blog/post");
    }

    #[tokio::test]
    async fn test_bulk_result_is_scope_filtered() {
        let fetcher = site();
        let discovery = StubDiscovery::Lists(vec![
            "https://example.com/docs/b",
            "https://example.com/blog/post",
            "https://example.com/docs/a",
        ]);

        let (summary, exported) = run(&fetcher, Some(discovery)).await;

        assert_eq!(summary.strategy, DiscoveryStrategy::Bulk);
        assert_eq!(
            exported,
            vec!["https://example.com/docs/b", "https://example.com/docs/a"]
        );
        assert_eq!(fetcher.hits("https://example.com/blog/post"), 0);
        assert_eq!(summary.skipped_by_state().get(&PageState::OutOfScope), Some(&1));
    }

    #[tokio::test]
    async fn test_bulk_failure_falls_back_to_traversal() {
        let fetcher = site();
        let (summary, exported) = run(&fetcher, Some(StubDiscovery::Fails)).await;

        assert_eq!(summary.strategy, DiscoveryStrategy::Traversal);
        assert_eq!(
            exported,
            vec!["https://example.com/docs/", "https://example.com/docs/a"]
        );
    }

    #[tokio::test]
    async fn test_empty_bulk_result_falls_back() {
        let fetcher = site();
        let (summary, _) = run(&fetcher, Some(StubDiscovery::Lists(Vec::new()))).await;
        assert_eq!(summary.strategy, DiscoveryStrategy::Traversal);
    }

    #[tokio::test]
    async fn test_bulk_result_entirely_out_of_scope_falls_back() {
        let fetcher = site();
        let discovery = StubDiscovery::Lists(vec!["https://example.com/blog/post"]);
        let (summary, exported) = run(&fetcher, Some(discovery)).await;

        assert_eq!(summary.strategy, DiscoveryStrategy::Traversal);
        assert_eq!(exported.len(), 2);
    }

    #[tokio::test]
    async fn test_discovery_disabled() {
        let fetcher = site();
        let (summary, _) = run(&fetcher, None).await;
        assert_eq!(summary.strategy, DiscoveryStrategy::Traversal);
    }

    #[tokio::test]
    async fn test_bulk_respects_page_cap() {
        let fetcher = site();
        let mut config = config("https://example.com/docs/");
        config.discovery.max_pages = Some(1);
        let discovery = StubDiscovery::Lists(vec![
            "https://example.com/docs/a",
            "https://example.com/docs/b",
        ]);

        let exporter = Exporter::with_collaborators(config, &fetcher, Some(discovery)).unwrap();
        let summary = exporter.run_with(Html2MdRenderer, MemorySink::default()).await;

        assert_eq!(summary.pages_exported(), 1);
        assert!(summary.stopped_early);
        assert_eq!(fetcher.hits("https://example.com/docs/b"), 0);
    }

    #[test]
    fn test_scope_prefix_override() {
        let mut config = config("https://example.com/docs/guide/intro");
        config.discovery.scope_prefix = Some("/docs".to_string());

        let exporter =
            Exporter::with_collaborators(config, MapFetcher::new(), None::<StubDiscovery>).unwrap();
        assert_eq!(exporter.scope(), &ScopeConfig::new("example.com", "/docs"));
    }

    #[test]
    fn test_seed_outside_scope_prefix_never_exported() {
        let mut config = config("https://example.com/blog/");
        config.discovery.scope_prefix = Some("/docs".to_string());

        let fetcher = site();
        let result = Exporter::with_collaborators(config, &fetcher, None::<StubDiscovery>);
        assert!(matches!(result, Err(ExportError::Config(_))));
        assert_eq!(fetcher.total_hits(), 0);
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let result = Exporter::with_collaborators(
            config("ftp://example.com/"),
            MapFetcher::new(),
            None::<StubDiscovery>,
        );
        assert!(matches!(result, Err(ExportError::Config(_))));
    }
}
