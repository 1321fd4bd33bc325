//! Configuration loading utilities
//!
//! This module handles loading configuration from various sources with proper
//! precedence and validation.

use super::*;
use crate::core::error::{Error, Result};
use std::env;
use std::fs;
use std::path::Path;

pub const ENV_DB_URL: &str = "QUERYPLAN_DB_URL";
pub const ENV_DB_READ_ONLY: &str = "QUERYPLAN_DB_READ_ONLY";
pub const ENV_DB_BUSY_TIMEOUT_MS: &str = "QUERYPLAN_DB_BUSY_TIMEOUT_MS";

const KNOWN_ENV_VARS: [&str; 3] = [ENV_DB_URL, ENV_DB_READ_ONLY, ENV_DB_BUSY_TIMEOUT_MS];

/// Load configuration from environment variables on top of the defaults
pub fn load_from_env() -> Result<QueryPlanConfig> {
    let mut config = QueryPlanConfig::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Overwrite the settings that have a matching environment variable
pub fn apply_env_overrides(config: &mut QueryPlanConfig) -> Result<()> {
    if let Ok(url) = env::var(ENV_DB_URL) {
        config.database.url = url;
    }

    if let Ok(read_only) = env::var(ENV_DB_READ_ONLY) {
        config.database.read_only = read_only.parse().map_err(|e| {
            Error::ConfigurationError(format!("Invalid {}: {}", ENV_DB_READ_ONLY, e))
        })?;
    }

    if let Ok(timeout) = env::var(ENV_DB_BUSY_TIMEOUT_MS) {
        config.database.busy_timeout_ms = timeout.parse().map_err(|e| {
            Error::ConfigurationError(format!("Invalid {}: {}", ENV_DB_BUSY_TIMEOUT_MS, e))
        })?;
    }

    for (key, _) in env::vars_os() {
        let Some(key) = key.to_str() else { continue };
        if key.starts_with("QUERYPLAN_") && !KNOWN_ENV_VARS.contains(&key) {
            log::warn!("Ignoring unknown configuration variable {}", key);
        }
    }

    Ok(())
}

/// Load configuration from a file (YAML or TOML based on extension)
pub fn load_from_file(path: &Path) -> Result<QueryPlanConfig> {
    if !path.exists() {
        return Err(Error::ConfigurationError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(&contents),
        Some("toml") => load_from_toml(&contents),
        Some(ext) => Err(Error::ConfigurationError(format!(
            "Unsupported config file format: {}",
            ext
        ))),
        None => {
            // Try to parse as YAML first, then TOML
            load_from_yaml(&contents).or_else(|_| load_from_toml(&contents))
        }
    }
}

/// Load configuration from YAML string
pub fn load_from_yaml(yaml: &str) -> Result<QueryPlanConfig> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse YAML config: {}", e)))
}

/// Load configuration from TOML string
pub fn load_from_toml(toml: &str) -> Result<QueryPlanConfig> {
    toml::from_str(toml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse TOML config: {}", e)))
}

/// Load configuration with precedence: defaults -> file -> environment
pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<QueryPlanConfig> {
    let mut config = match config_file {
        Some(file_path) => load_from_file(file_path.as_ref())?,
        None => QueryPlanConfig::default(),
    };

    // Environment has the highest precedence
    apply_env_overrides(&mut config)?;

    config.validate()?;

    Ok(config)
}

/// Save configuration to a file
pub fn save_to_file(config: &QueryPlanConfig, path: &Path) -> Result<()> {
    let contents = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => config.to_yaml()?,
        Some("toml") => config.to_toml()?,
        Some(ext) => {
            return Err(Error::ConfigurationError(format!(
                "Unsupported config file format: {}",
                ext
            )))
        }
        None => config.to_yaml()?, // Default to YAML
    };

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigurationError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    fs::write(path, contents).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to write config file {}: {}",
            path.display(),
            e
        ))
    })
}
