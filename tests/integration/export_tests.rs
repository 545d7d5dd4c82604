//! Integration tests for the exporter
//!
//! These tests use wiremock to serve a small documentation site and run the
//! full export cycle end-to-end into a temporary directory.

use gitbook_export::config::{Config, OutputFormat};
use gitbook_export::output::DiscoveryStrategy;
use gitbook_export::state::PageState;
use gitbook_export::{export, Exporter};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing under `out`
fn create_test_config(seed: &str, out: &Path) -> Config {
    let mut config = Config::new(seed);
    config.fetch.delay_ms = 0;
    config.output.directory = out.to_string_lossy().into_owned();
    config
}

/// Host directory name for a mock server, e.g. `127.0.0.1:41234`
fn host_dir(server: &MockServer) -> String {
    server.address().to_string()
}

/// Every file below `dir`, relative to it, sorted
fn list_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(rel) = path.strip_prefix(root) {
                out.push(rel.to_path_buf());
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    let mut files: Vec<String> = files
        .into_iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect();
    files.sort();
    files
}

async fn mount_page(server: &MockServer, at: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_seed_with_one_nav_link_produces_four_files() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><nav><a href="/page1">P1</a></nav><main><h1>Main Page</h1></main></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/page1",
        r#"<html><body><main><h1>Page 1</h1></main></body></html>"#,
    )
    .await;

    let out = TempDir::new().unwrap();
    let summary = export(create_test_config(&server.uri(), out.path()))
        .await
        .expect("export should start");

    assert_eq!(summary.strategy, DiscoveryStrategy::Traversal);
    assert_eq!(summary.pages_exported(), 2);

    let host = host_dir(&server);
    assert_eq!(
        list_files(out.path()),
        vec![
            format!("{}/html/index.html", host),
            format!("{}/html/page1.html", host),
            format!("{}/md/index.md", host),
            format!("{}/md/page1.md", host),
        ]
    );

    let root = out.path().join(&host);
    assert_eq!(
        fs::read_to_string(root.join("html/index.html")).unwrap(),
        "<main><h1>Main Page</h1></main>"
    );
    assert_eq!(
        fs::read_to_string(root.join("html/page1.html")).unwrap(),
        "<main><h1>Page 1</h1></main>"
    );

    let index_md = fs::read_to_string(root.join("md/index.md")).unwrap();
    assert!(index_md.contains("Main Page"));
    assert!(!index_md.contains("P1"));
    assert!(!index_md.contains("<h1>"));
    assert!(fs::read_to_string(root.join("md/page1.md"))
        .unwrap()
        .contains("Page 1"));
}

#[tokio::test]
async fn test_self_link_is_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><nav><a href="/">Home</a></nav><main><p>Welcome</p></main></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let summary = export(create_test_config(&format!("{}/", server.uri()), out.path()))
        .await
        .unwrap();

    assert_eq!(summary.pages_exported(), 1);
    server.verify().await;
}

#[tokio::test]
async fn test_sitemap_entry_outside_scope_is_not_exported() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/docs/sitemap.xml",
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/docs/</loc></url>
  <url><loc>{base}/docs/setup</loc></url>
  <url><loc>{base}/blog/announcement</loc></url>
</urlset>"#
        ),
    )
    .await;
    mount_page(&server, "/docs/", "<main><h1>Docs</h1></main>").await;
    mount_page(&server, "/docs/setup", "<main><h1>Setup</h1></main>").await;
    Mock::given(method("GET"))
        .and(path("/blog/announcement"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<main><h1>News</h1></main>"))
        .expect(0)
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let summary = export(create_test_config(&format!("{}/docs/", base), out.path()))
        .await
        .unwrap();

    assert_eq!(summary.strategy, DiscoveryStrategy::Bulk);
    assert_eq!(summary.pages_exported(), 2);
    assert_eq!(summary.skipped_by_state().get(&PageState::OutOfScope), Some(&1));

    let files = list_files(out.path());
    assert!(files.iter().all(|f| !f.contains("blog")));
    assert!(files.contains(&format!("{}/md/docs/setup.md", host_dir(&server))));
    assert!(files.contains(&format!("{}/md/docs/index.md", host_dir(&server))));

    server.verify().await;
}

#[tokio::test]
async fn test_single_file_follows_discovery_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<nav><a href="/guide">Guide</a><a href="/reference">Reference</a></nav><main><h1>Welcome</h1></main>"#,
    )
    .await;
    mount_page(
        &server,
        "/guide",
        r#"<nav><a href="/guide/install">Install</a></nav><main><h1>Guide</h1></main>"#,
    )
    .await;
    mount_page(&server, "/guide/install", "<main><h1>Install</h1></main>").await;
    mount_page(&server, "/reference", "<article><h1>Reference</h1></article>").await;

    let out = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), out.path());
    config.output.format = OutputFormat::Md;
    config.output.single_file = true;

    let summary = export(config).await.unwrap();
    let host = host_dir(&server);
    assert_eq!(list_files(out.path()), vec![format!("{}/full_book.md", host)]);
    assert_eq!(
        summary.aggregate_path,
        Some(out.path().join(&host).join("full_book.md"))
    );

    let book = fs::read_to_string(out.path().join(&host).join("full_book.md")).unwrap();
    let positions: Vec<usize> = ["Welcome", "Guide", "Install", "Reference"]
        .iter()
        .map(|title| book.find(title).unwrap_or(usize::MAX))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "book order: {}", book);
    assert!(book.contains(&format!("<!-- Source: {}/guide/install -->", server.uri())));
}

#[tokio::test]
async fn test_skipped_pages_do_not_stop_the_run() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<nav><a href="/broken">Broken</a><a href="/bare">Bare</a><a href="/fine">Fine</a></nav><main><h1>Home</h1></main>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/bare", "<html><body><div>No content region</div></body></html>").await;
    mount_page(&server, "/fine", "<main><h1>Fine</h1></main>").await;

    let out = TempDir::new().unwrap();
    let summary = export(create_test_config(&server.uri(), out.path()))
        .await
        .unwrap();

    assert_eq!(summary.pages_exported(), 2);
    assert!(summary.is_partial());

    let by_state = summary.skipped_by_state();
    assert_eq!(by_state.get(&PageState::FetchFailed), Some(&1));
    assert_eq!(by_state.get(&PageState::ExtractionMissed), Some(&1));

    let files = list_files(out.path());
    assert!(files.iter().all(|f| !f.contains("broken") && !f.contains("bare")));
}

#[tokio::test]
async fn test_unreachable_seed_is_a_failed_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let summary = export(create_test_config(&server.uri(), out.path()))
        .await
        .unwrap();

    assert!(summary.is_failure());
    assert_eq!(summary.skipped[0].state, PageState::FetchFailed);
    assert!(list_files(out.path()).is_empty());
}

#[tokio::test]
async fn test_stop_handle_before_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<main>x</main>"))
        .expect(0)
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), out.path());
    config.discovery.use_sitemap = false;

    let exporter = Exporter::new(config).unwrap();
    exporter
        .stop_handle()
        .store(true, std::sync::atomic::Ordering::Relaxed);
    let summary = exporter.run().await;

    assert!(summary.stopped_early);
    assert!(summary.is_failure());
    server.verify().await;
}
