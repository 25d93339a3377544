//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod api;
mod helpers;
mod misc;


use crate::schema::ScholarConfig;
use scholar_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ScholarConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    api::validate_api(&mut errors, config);
    misc::validate_retry(&mut errors, config);
    misc::validate_chat(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
