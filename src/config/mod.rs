//! Configuration module
//!
//! This module assembles the run configuration from defaults, an optional
//! TOML file, and (in the binary) command-line overrides, then validates it.
//!
//! # Example
//!
//! ```no_run
//! use gitbook_export::config::load_config;
//!
//! let config = load_config("https://docs.example.com/", None).unwrap();
//! println!("Politeness delay: {}ms", config.fetch.delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ConfigFile, DiscoveryConfig, FetchConfig, OutputConfig, OutputFormat,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_file, parse_config_file};
pub use validation::validate;
