//! API client struct, header assembly and URL building.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use scholar_common::{ScholarError, StorageError};
use scholar_config::ApiConfig;

use crate::credentials::CredentialStore;
use crate::endpoint::QueryParams;

/// Handle to the remote backend. Cheap to clone; clones share the
/// connection pool and credentials.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) config: Arc<ApiConfig>,
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: CredentialStore,
}

impl ApiClient {
    pub fn new(config: ApiConfig, credentials: CredentialStore) -> Result<Self, ScholarError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ScholarError::HttpClient(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
            http,
            credentials,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn set_token(&self, token: impl Into<String>) -> Result<(), StorageError> {
        self.credentials.set_token(token)
    }

    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.credentials.clear_token()
    }

    /// Default headers plus `Authorization` when a token is held.
    /// The token is read now, not when the client was built.
    pub(crate) fn headers(&self) -> Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| format!("invalid header name {name:?}: {e}"))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| format!("invalid value for header {name}: {e}"))?;
            headers.insert(name, value);
        }

        if let Some(token) = self.credentials.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| "stored token is not a valid header value".to_string())?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    pub(crate) fn build_url(&self, endpoint: &str, query: &QueryParams) -> Result<Url, String> {
        let raw = format!("{}{}", self.config.base_url, endpoint);
        let mut url = Url::parse(&raw).map_err(|e| format!("invalid URL {raw:?}: {e}"))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
