//! Scholar client configuration.
//!
//! TOML-based configuration for the backend connection, retry policy,
//! chat history, credential storage and logging. All sections use
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scholar_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ApiConfig, ChatConfig, EndpointTable, LogLevel, LoggingConfig, RetryConfig, ScholarConfig,
    StorageConfig, CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use scholar_common::ConfigError;

/// Load and validate config.
///
/// An explicit `path` must exist. Without one, the platform default path
/// is used and a commented template is created on first run.
pub fn load_config(path: Option<&Path>) -> Result<ScholarConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ScholarConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
