//! GitBook-Export main entry point
//!
//! This is the command-line interface for exporting a documentation site.

use anyhow::Context;
use clap::Parser;
use gitbook_export::config::{load_config, validate, Config, OutputFormat};
use gitbook_export::output::print_summary;
use gitbook_export::Exporter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// GitBook-Export: mirror a documentation site into HTML and Markdown
///
/// Pages are discovered from the site's sitemap when it has one, otherwise by
/// walking its navigation sidebar from the given URL. Only pages under the
/// URL's path are exported.
#[derive(Parser, Debug)]
#[command(name = "gitbook-export")]
#[command(version = "1.0.0")]
#[command(about = "Export a documentation site to HTML and Markdown", long_about = None)]
struct Cli {
    /// Seed URL of the documentation site
    #[arg(value_name = "URL")]
    url: String,

    /// Output root directory (a subdirectory per host is created inside)
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Artifacts to produce per page
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Concatenate all Markdown into a single full_book.md
    #[arg(short, long)]
    single_file: bool,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Delay between consecutive requests, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Skip sitemap discovery and walk the navigation directly
    #[arg(long)]
    no_sitemap: bool,

    /// Path prefix pages must start with (defaults to the seed URL's path)
    #[arg(long, value_name = "PREFIX")]
    scope_prefix: Option<String>,

    /// Stop after this many exported pages
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    tracing::info!(
        "Exporting {} to {} (format: {:?}, single file: {})",
        config.seed_url,
        config.output.directory,
        config.output.format,
        config.output.single_file
    );

    let exporter = Exporter::new(config).context("Failed to start export")?;

    // Ctrl-C stops the run after the current page; output so far is kept
    let stop = exporter.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing current page");
            stop.store(true, Ordering::Relaxed);
        }
    });

    let summary = exporter.run().await;
    if !cli.quiet {
        print_summary(&summary);
    }

    if summary.is_failure() {
        tracing::error!("No pages were exported");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gitbook_export=info,warn"),
            1 => EnvFilter::new("gitbook_export=debug,info"),
            2 => EnvFilter::new("gitbook_export=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = load_config(&cli.url, cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid configuration".to_string(),
    })?;

    if let Some(output) = &cli.output {
        config.output.directory = output.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.single_file {
        config.output.single_file = true;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.fetch.delay_ms = delay_ms;
    }
    if cli.no_sitemap {
        config.discovery.use_sitemap = false;
    }
    if let Some(prefix) = &cli.scope_prefix {
        config.discovery.scope_prefix = Some(prefix.clone());
    }
    if let Some(max_pages) = cli.max_pages {
        config.discovery.max_pages = Some(max_pages);
    }

    // Overrides may have introduced invalid values
    validate(&config)?;
    Ok(config)
}
