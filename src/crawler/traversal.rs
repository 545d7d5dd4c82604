//! Traversal engine
//!
//! Walks the navigation graph from the seed, one page at a time. The frontier
//! is a stack and children are pushed in reverse discovery order, so the
//! first link of a page is the next one visited. This keeps a section's
//! children ahead of its siblings, which follows a table of contents' reading
//! order more closely than a breadth-first walk would.
//!
//! Every URL is marked visited when it is pushed, not when it is popped: a
//! page linked from two places before either is processed is still fetched
//! once.

use crate::crawler::document::ParsedDocument;
use crate::crawler::extract::extract_content;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::links::discover_links;
use crate::crawler::render::MarkdownRenderer;
use crate::output::{ExportSummary, ExportedPage, OutputSink, PathRegistry};
use crate::state::{PageState, TraversalState};
use crate::url::{CanonicalUrl, ScopeConfig};
use crate::ExportError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Run-wide limits, shared by both discovery strategies
#[derive(Debug, Clone, Default)]
pub struct RunLimits {
    /// Pause between consecutive fetches
    pub delay: Duration,

    /// Stop after this many exported pages
    pub max_pages: Option<usize>,

    /// Cooperative stop flag; once set no new page is started
    pub stop: Arc<AtomicBool>,
}

/// Outcome of visiting one page
#[derive(Debug)]
pub struct Visit {
    pub state: PageState,

    /// In-scope navigation links of the page; empty when the fetch failed
    pub links: Vec<CanonicalUrl>,
}

/// Fetches, extracts and writes single pages
///
/// Owns everything a run accumulates: the path registry, the output sink
/// and the summary.
pub struct PageExporter<F, R, S> {
    fetcher: F,
    renderer: R,
    sink: S,
    scope: ScopeConfig,
    registry: PathRegistry,
    summary: ExportSummary,
    limits: RunLimits,
    fetches: usize,
}

impl<F, R, S> PageExporter<F, R, S>
where
    F: Fetcher,
    R: MarkdownRenderer,
    S: OutputSink,
{
    pub fn new(
        fetcher: F,
        renderer: R,
        sink: S,
        scope: ScopeConfig,
        limits: RunLimits,
        summary: ExportSummary,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            sink,
            scope,
            registry: PathRegistry::new(),
            summary,
            limits,
            fetches: 0,
        }
    }

    pub fn summary_mut(&mut self) -> &mut ExportSummary {
        &mut self.summary
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// True once the stop flag is set or the page cap is reached
    pub fn should_stop(&self) -> bool {
        if self.limits.stop.load(Ordering::Relaxed) {
            return true;
        }
        self.limits
            .max_pages
            .is_some_and(|max| self.summary.pages_exported() >= max)
    }

    pub fn mark_stopped_early(&mut self) {
        self.summary.stopped_early = true;
    }

    /// Fetches `url`, routes its content region to the sink and returns the
    /// page's navigation links
    ///
    /// Never fails: fetch errors, extraction misses and write failures are
    /// logged, recorded in the summary and reported through `Visit::state`.
    pub async fn visit(&mut self, url: &CanonicalUrl) -> Visit {
        if self.fetches > 0 && !self.limits.delay.is_zero() {
            tokio::time::sleep(self.limits.delay).await;
        }
        self.fetches += 1;

        let body = match self.fetcher.fetch(url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                self.summary
                    .record_skipped(url.as_str(), PageState::FetchFailed, e.to_string());
                return Visit {
                    state: PageState::FetchFailed,
                    links: Vec::new(),
                };
            }
        };

        let mut doc = ParsedDocument::parse(&body);

        // Before extraction, which detaches nodes from the tree
        let links = discover_links(&doc, url, &self.scope);

        let Some(content) = extract_content(&mut doc, &self.renderer) else {
            let miss = ExportError::ExtractionMiss {
                url: url.to_string(),
            };
            tracing::warn!("{}, skipping", miss);
            self.summary
                .record_skipped(url.as_str(), PageState::ExtractionMissed, miss.to_string());
            return Visit {
                state: PageState::ExtractionMissed,
                links,
            };
        };

        let relative_path = self.registry.claim(url);
        let report = self.sink.write_page(&ExportedPage {
            order_index: self.summary.pages_exported(),
            url,
            relative_path: &relative_path,
            content: &content,
        });
        self.summary.artifacts_written += report.written.len();
        self.summary.write_failures += report.failures.len();

        if report.any_success() {
            tracing::info!("Saved {} to {}", url, relative_path);
            self.summary.record_exported(url.as_str());
            Visit {
                state: PageState::Exported,
                links,
            }
        } else {
            tracing::warn!("No artifact of {} could be written", url);
            self.summary.record_skipped(
                url.as_str(),
                PageState::WriteFailed,
                "no artifact could be written",
            );
            Visit {
                state: PageState::WriteFailed,
                links,
            }
        }
    }

    /// Flushes the sink and closes the summary
    pub fn finish(mut self) -> ExportSummary {
        match self.sink.finish() {
            Ok(path) => self.summary.aggregate_path = path,
            Err(e) => {
                tracing::error!("{}", e);
                self.summary.write_failures += 1;
            }
        }
        self.summary.finish();
        self.summary
    }
}

/// Depth-first walk over navigation links
#[derive(Debug)]
pub struct TraversalEngine {
    frontier: Vec<CanonicalUrl>,
    visited: HashSet<CanonicalUrl>,
    state: TraversalState,
}

impl TraversalEngine {
    /// Creates an engine whose frontier holds only `seed`, already marked
    /// visited
    pub fn new(seed: CanonicalUrl) -> Self {
        let mut visited = HashSet::new();
        visited.insert(seed.clone());

        Self {
            frontier: vec![seed],
            visited,
            state: TraversalState::Pending,
        }
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    fn transition(&mut self, next: TraversalState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal traversal transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    /// Pops the next URL, or moves to `Done` when the frontier is empty
    pub fn next_url(&mut self) -> Option<CanonicalUrl> {
        match self.frontier.pop() {
            Some(url) => {
                self.transition(TraversalState::Visiting);
                Some(url)
            }
            None => {
                self.transition(TraversalState::Done);
                None
            }
        }
    }

    /// Applies the outcome of the page popped last
    pub fn complete(&mut self, visit: Visit) {
        if visit.state == PageState::FetchFailed {
            self.transition(TraversalState::Pending);
            return;
        }

        self.transition(TraversalState::Emitting);
        self.push_children(visit.links);
        self.transition(TraversalState::Pending);
    }

    /// Claims unvisited links and pushes them so the first one pops next
    fn push_children(&mut self, links: Vec<CanonicalUrl>) {
        let fresh: Vec<CanonicalUrl> = links
            .into_iter()
            .filter(|link| self.visited.insert(link.clone()))
            .collect();
        self.frontier.extend(fresh.into_iter().rev());
    }

    /// Drains the frontier through `exporter`
    ///
    /// Ends in `Done`, either with an empty frontier or because the exporter
    /// asked to stop.
    pub async fn run<F, R, S>(&mut self, exporter: &mut PageExporter<F, R, S>)
    where
        F: Fetcher,
        R: MarkdownRenderer,
        S: OutputSink,
    {
        loop {
            if exporter.should_stop() {
                if self.frontier_len() > 0 {
                    tracing::info!("Stopping with {} pages still queued", self.frontier_len());
                    exporter.mark_stopped_early();
                }
                self.transition(TraversalState::Done);
                break;
            }

            let Some(url) = self.next_url() else {
                break;
            };

            tracing::debug!("Visiting {} ({} queued)", url, self.frontier_len());
            let visit = exporter.visit(&url).await;
            self.complete(visit);
        }

        tracing::debug!("Traversal done, {} pages claimed", self.visited_count());
    }
}
