//! Load config from a JSON file, then apply environment overrides.
//!
//! Overrides: `ENV`, `DB_PATH`, `HTTP_ADDRESS`. A `.env` file in the working
//! directory is read first so it can supply any of these.

use crate::config::{validate, Args, Config};
use crate::error::ConfigError;
use std::path::Path;

/// Resolve the config path from args (which already fall back to `CONFIG_PATH`) and load it.
pub fn load(args: &Args) -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    let path = args.config.as_deref().ok_or(ConfigError::MissingPath)?;
    load_from_path(path, |key| std::env::var(key).ok())
}

/// Read, parse, override and validate. `env` looks up override variables.
pub fn load_from_path<F>(path: &Path, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mut config: Config = serde_json::from_str(&raw)?;
    apply_overrides(&mut config, env);
    validate(&config)?;
    Ok(config)
}

fn apply_overrides<F>(config: &mut Config, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());
    if let Some(v) = non_empty("ENV") {
        config.env = v;
    }
    if let Some(v) = non_empty("DB_PATH") {
        config.db_path = v;
    }
    if let Some(v) = non_empty("HTTP_ADDRESS") {
        config.http_server.address = v;
    }
}
