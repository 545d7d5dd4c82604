use crate::config::types::{Config, ConfigFile};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Every section and key is optional; missing values take their defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(ConfigFile)` - Successfully parsed file
/// * `Err(ConfigError)` - Failed to read or parse the file
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config_file(&content)
}

/// Parses configuration file content
pub fn parse_config_file(content: &str) -> Result<ConfigFile, ConfigError> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file)
}

/// Builds and validates a run configuration for `seed_url`
///
/// # Arguments
///
/// * `seed_url` - The page the export starts from
/// * `path` - Optional TOML file supplying the remaining settings
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use gitbook_export::config::load_config;
///
/// let config = load_config("https://docs.example.com/", Some(Path::new("export.toml"))).unwrap();
/// println!("Writing to {}", config.output.directory);
/// ```
pub fn load_config(seed_url: &str, path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };

    let config = Config {
        seed_url: seed_url.to_string(),
        fetch: file.fetch,
        output: file.output,
        discovery: file.discovery,
    };

    validate(&config)?;

    Ok(config)
}
