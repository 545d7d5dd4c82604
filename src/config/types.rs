use serde::Deserialize;
use std::time::Duration;

/// Browser-like identification; documentation hosts routinely refuse bare clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36";

/// Main configuration structure for an export run
#[derive(Debug, Clone)]
pub struct Config {
    /// The page the export starts from
    pub seed_url: String,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
    pub discovery: DiscoveryConfig,
}

impl Config {
    /// A configuration with every section at its defaults
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

/// On-disk shape of the optional TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub fetch: FetchConfig,
    pub output: OutputConfig,
    pub discovery: DiscoveryConfig,
}

/// HTTP fetch configuration, handed to the fetcher once at construction
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Fixed delay between consecutive fetches (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            delay_ms: 200,
        }
    }
}

/// Which artifacts to produce per page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HTML fragments only
    Html,
    /// Markdown only
    Md,
    /// Both HTML and Markdown
    #[default]
    All,
}

impl OutputFormat {
    pub fn wants_html(self) -> bool {
        matches!(self, Self::Html | Self::All)
    }

    pub fn wants_markdown(self) -> bool {
        matches!(self, Self::Md | Self::All)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory; artifacts land under `<directory>/<host>/`
    pub directory: String,

    pub format: OutputFormat,

    /// Concatenate all Markdown into `full_book.md` instead of per-page files
    #[serde(rename = "single-file")]
    pub single_file: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
            format: OutputFormat::All,
            single_file: false,
        }
    }
}

/// Page discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Try `sitemap.xml` before falling back to navigation traversal
    #[serde(rename = "use-sitemap")]
    pub use_sitemap: bool,

    /// Overrides the path prefix derived from the seed URL
    #[serde(rename = "scope-prefix")]
    pub scope_prefix: Option<String>,

    /// Stop after this many pages have been exported
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            use_sitemap: true,
            scope_prefix: None,
            max_pages: None,
        }
    }
}
