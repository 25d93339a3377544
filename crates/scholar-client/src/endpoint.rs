//! Endpoint path templating and query parameters.
//!
//! Ids are caller data and always go into a path as one encoded segment.
//! Fixed sub-paths such as `documents` are joined verbatim.

use std::borrow::Cow;

/// Percent-encode `id` so `/`, `?` and `#` stay inside a single segment.
pub fn encode_segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Substitute the `:id` placeholder in an endpoint template.
pub fn fill_path(template: &str, id: &str) -> String {
    template.replace(":id", &encode_segment(id))
}

/// Address one item under a collection endpoint: `/api/user/profile` + `u1`.
pub fn item_path(endpoint: &str, id: &str) -> String {
    join_path(endpoint, &encode_segment(id))
}

/// Append a fixed sub-path to an endpoint, e.g. `/api/applications` + `deadlines`.
pub fn join_path(endpoint: &str, tail: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        tail.trim_start_matches('/')
    )
}

/// Ordered query parameters. Absent optional values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn with_opt<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
