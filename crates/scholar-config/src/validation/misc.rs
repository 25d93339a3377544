//! Retry and chat validation.

use super::helpers::validate_range;
use crate::schema::ScholarConfig;

pub(super) fn validate_retry(errors: &mut Vec<String>, config: &ScholarConfig) {
    validate_range(
        errors,
        "retry.max_attempts",
        config.retry.max_attempts as u64,
        1,
        10,
    );
    validate_range(
        errors,
        "retry.base_delay_ms",
        config.retry.base_delay_ms,
        0,
        60_000,
    );
}

pub(super) fn validate_chat(errors: &mut Vec<String>, config: &ScholarConfig) {
    validate_range(
        errors,
        "chat.history_limit",
        config.chat.history_limit as u64,
        1,
        500,
    );
}
