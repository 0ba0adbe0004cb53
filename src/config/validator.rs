//! Required-value checks run after file parsing and env overrides.

use crate::config::Config;
use crate::error::ConfigError;

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.env.trim().is_empty() {
        return Err(ConfigError::Missing("env"));
    }
    if config.db_path.trim().is_empty() {
        return Err(ConfigError::Missing("db_path"));
    }
    if config.http_server.address.trim().is_empty() {
        return Err(ConfigError::Missing("http_server.address"));
    }
    Ok(())
}
