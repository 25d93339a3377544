//! Backend connection validation.

use super::helpers::validate_range;
use crate::schema::ScholarConfig;

pub(super) fn validate_api(errors: &mut Vec<String>, config: &ScholarConfig) {
    let api = &config.api;

    if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
        errors.push(format!(
            "api.base_url = {:?} must start with http:// or https://",
            api.base_url
        ));
    }
    if api.base_url.ends_with('/') {
        errors.push(format!(
            "api.base_url = {:?} must not end with '/'",
            api.base_url
        ));
    }

    validate_range(errors, "api.timeout_ms", api.timeout_ms, 100, 300_000);

    for (name, path) in api.endpoints.entries() {
        if !path.starts_with('/') {
            errors.push(format!("api.endpoints.{name} = {path:?} must start with '/'"));
        }
    }

    for (key, value) in &api.headers {
        if key.trim().is_empty() {
            errors.push("api.headers contains an empty header name".to_string());
        }
        if value.contains('\n') || value.contains('\r') {
            errors.push(format!("api.headers.{key} contains a line break"));
        }
    }
}
