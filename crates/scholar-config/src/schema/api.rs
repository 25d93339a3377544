//! Backend connection settings: base URL, endpoint table, timeout, headers.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://veeru707-scholarship-backend.hf.space";

/// Endpoint path table. Paths containing `:id` are templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointTable {
    pub chat: String,
    pub chat_history: String,
    pub health: String,
    pub scholarships: String,
    pub scholarship_search: String,
    pub scholarship_details: String,
    pub bookmark_scholarship: String,
    pub auth_signup: String,
    pub auth_signin: String,
    pub auth_signout: String,
    pub user_profile: String,
    pub applications: String,
    pub application_status: String,
}

impl EndpointTable {
    /// `(name, path)` pairs, used by validation and diagnostics.
    pub fn entries(&self) -> [(&'static str, &str); 13] {
        [
            ("chat", &self.chat),
            ("chat_history", &self.chat_history),
            ("health", &self.health),
            ("scholarships", &self.scholarships),
            ("scholarship_search", &self.scholarship_search),
            ("scholarship_details", &self.scholarship_details),
            ("bookmark_scholarship", &self.bookmark_scholarship),
            ("auth_signup", &self.auth_signup),
            ("auth_signin", &self.auth_signin),
            ("auth_signout", &self.auth_signout),
            ("user_profile", &self.user_profile),
            ("applications", &self.applications),
            ("application_status", &self.application_status),
        ]
    }
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            chat: "/query".into(),
            chat_history: "/api/chat/history".into(),
            health: "/health".into(),
            scholarships: "/api/scholarships".into(),
            scholarship_search: "/api/scholarships/search".into(),
            scholarship_details: "/api/scholarships/:id".into(),
            bookmark_scholarship: "/api/scholarships/bookmark".into(),
            auth_signup: "/api/auth/signup".into(),
            auth_signin: "/api/auth/signin".into(),
            auth_signout: "/api/auth/signout".into(),
            user_profile: "/api/user/profile".into(),
            applications: "/api/applications".into(),
            application_status: "/api/applications/:id".into(),
        }
    }
}

/// Remote backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in milliseconds (valid range: 100-300000).
    pub timeout_ms: u64,
    /// Headers sent with every request.
    pub headers: BTreeMap<String, String>,
    pub endpoints: EndpointTable,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_ms: 30_000,
            headers,
            endpoints: EndpointTable::default(),
        }
    }
}
