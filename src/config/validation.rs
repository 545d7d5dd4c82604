use crate::config::types::{Config, DiscoveryConfig, FetchConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let seed = validate_seed_url(&config.seed_url)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    validate_discovery_config(&config.discovery)?;
    validate_seed_in_scope(&seed, &config.discovery)?;
    Ok(())
}

/// Validates the seed URL: must parse, be http(s), and carry a host
fn validate_seed_url(seed: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use HTTP or HTTPS",
            seed
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            seed
        )));
    }

    Ok(url)
}

/// The seed is always exported, so it must lie inside an explicit scope prefix
fn validate_seed_in_scope(seed: &Url, config: &DiscoveryConfig) -> Result<(), ConfigError> {
    match &config.scope_prefix {
        Some(prefix) if !seed.path().starts_with(prefix.as_str()) => {
            Err(ConfigError::Validation(format!(
                "seed path '{}' is outside scope-prefix '{}'",
                seed.path(),
                prefix
            )))
        }
        _ => Ok(()),
    }
}
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if let Some(prefix) = &config.scope_prefix {
        if !prefix.is_empty() && !prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "scope-prefix must start with '/', got '{}'",
                prefix
            )));
        }
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1".to_string(),
        ));
    }

    Ok(())
}
