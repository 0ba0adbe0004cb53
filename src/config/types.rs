//! Service configuration shapes: command line and config file.

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Grace period for in-flight requests on shutdown when the config file sets none.
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// student-api command line arguments.
#[derive(Debug, Parser)]
#[command(name = "student-api")]
#[command(about = "JSON REST service for student records")]
pub struct Args {
    /// Path to the JSON config file.
    #[arg(short, long, env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct HttpServerConfig {
    #[serde(default)]
    pub address: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Deployment label, e.g. `dev` or `production`.
    #[serde(default)]
    pub env: String,
    /// SQLite database file. `:memory:` keeps everything in process.
    #[serde(default)]
    pub db_path: String,
    #[serde(default)]
    pub http_server: HttpServerConfig,
    #[serde(default)]
    pub shutdown_grace_secs: Option<u64>,
}

impl Config {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs.unwrap_or(DEFAULT_SHUTDOWN_GRACE_SECS))
    }
}
