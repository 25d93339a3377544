//! System configuration types: local storage and logging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where credentials are persisted between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the data directory. `None` uses the platform default.
    pub directory: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the storage directory, falling back to the OS data dir.
    pub fn resolve_directory(&self) -> Option<PathBuf> {
        self.directory
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("scholar")))
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Tracing filter directive scoped to this workspace's crates.
    pub fn directive(&self) -> String {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        format!("scholar={level},scholar_client={level},scholar_config={level}")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
