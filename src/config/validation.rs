//! Configuration validation utilities

use super::*;
use crate::core::error::{Error, Result};
use crate::io::sql::{DatabaseConnection, SqlConnection};

/// Longest busy timeout accepted (10 minutes)
pub const MAX_BUSY_TIMEOUT_MS: u64 = 600_000;

/// Validate the entire configuration
pub fn validate_config(config: &QueryPlanConfig) -> Result<()> {
    validate_database_config(&config.database)
}

/// Validate database configuration
pub fn validate_database_config(config: &DatabaseConfig) -> Result<()> {
    if config.url.trim().is_empty() {
        return Err(Error::ConfigurationError(
            "database url must not be empty".to_string(),
        ));
    }

    let connection = SqlConnection::from_url(&config.url)?;

    // Nothing could ever create tables in it
    if config.read_only && connection.connection_type() == &DatabaseConnection::Memory {
        return Err(Error::ConfigurationError(
            "an in-memory database cannot be opened read-only".to_string(),
        ));
    }

    if config.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
        return Err(Error::ConfigurationError(format!(
            "busy_timeout_ms must be at most {}, got {}",
            MAX_BUSY_TIMEOUT_MS, config.busy_timeout_ms
        )));
    }

    Ok(())
}
