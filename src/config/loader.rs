//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {message}")]
    Env { key: &'static str, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file. Missing sections take their defaults.
fn read_config_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the process configuration: defaults, then the optional file,
/// then the process environment.
pub fn load(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    load_with(path, |key| std::env::var(key).ok())
}

/// Like [`load`], reading variables through `lookup`.
/// Validation runs once on the merged result.
pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => RelayConfig::default(),
    };

    apply_env(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so the overlay can be tested
/// without touching process-wide state. Empty values count as unset.
pub fn apply_env<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(base_url) = get("OPENALEX_BASE_URL") {
        config.upstream.base_url = Some(base_url);
    }
    if let Some(mailto) = get("OPENALEX_MAILTO") {
        config.upstream.mailto = Some(mailto);
    }
    if let Some(host) = get("HOST") {
        config.listener.host = host;
    }
    if let Some(port) = get("PORT") {
        config.listener.port = port.trim().parse().map_err(|e| ConfigError::Env {
            key: "PORT",
            message: format!("{}", e),
        })?;
    }
    if let Some(level) = get("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(format) = get("LOG_FORMAT") {
        config.observability.log_format = format
            .parse()
            .map_err(|message| ConfigError::Env { key: "LOG_FORMAT", message })?;
    }
    if let Some(app_name) = get("NEW_RELIC_APP_NAME") {
        config.observability.app_name = app_name;
    }
    if let Some(license_key) = get("NEW_RELIC_LICENSE_KEY") {
        config.observability.license_key = Some(license_key);
    }
    if let Some(address) = get("METRICS_ADDRESS") {
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = address;
    }

    Ok(())
}
