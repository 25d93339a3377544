//! The envelope-producing request path and per-method helpers.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::client::ApiClient;
use crate::endpoint::QueryParams;
use crate::envelope::{Envelope, ErrorCode};

const GENERIC_HTTP_ERROR: &str = "An error occurred";
const TIMEOUT_MESSAGE: &str = "Request timeout";

/// Method, body and query for a single call.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub query: QueryParams,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            query: QueryParams::new(),
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

impl ApiClient {
    /// Perform one call and fold every outcome into an envelope.
    ///
    /// The whole exchange (connect, send, body read) races the configured
    /// timeout; on expiry the in-flight future is dropped.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Envelope<T> {
        let url = match self.build_url(endpoint, &options.query) {
            Ok(url) => url,
            Err(msg) => return Envelope::failure(ErrorCode::Unknown, msg),
        };
        let headers = match self.headers() {
            Ok(headers) => headers,
            Err(msg) => return Envelope::failure(ErrorCode::Unknown, msg),
        };

        let mut builder = self
            .http
            .request(options.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        debug!(method = %options.method, %url, "API request");

        let exchange = async move {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        match tokio::time::timeout(self.config.timeout(), exchange).await {
            Err(_) => {
                warn!(method = %options.method, %url, timeout_ms = self.config.timeout_ms, "API request timed out");
                Envelope::failure(ErrorCode::Network, TIMEOUT_MESSAGE)
            }
            Ok(Err(e)) => {
                warn!(method = %options.method, %url, error = %e, "API transport error");
                transport_failure(&e)
            }
            Ok(Ok((status, body))) => {
                debug!(method = %options.method, %url, status = status.as_u16(), "API response");
                interpret_response(status, &body)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: QueryParams) -> Envelope<T> {
        self.request(endpoint, RequestOptions::new(Method::GET).with_query(query))
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Envelope<T> {
        self.send_with_body(Method::POST, endpoint, body).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Envelope<T> {
        self.request(endpoint, RequestOptions::new(Method::POST))
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Envelope<T> {
        self.send_with_body(Method::PUT, endpoint, body).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Envelope<T> {
        self.send_with_body(Method::PATCH, endpoint, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str, query: QueryParams) -> Envelope<T> {
        self.request(endpoint, RequestOptions::new(Method::DELETE).with_query(query))
            .await
    }

    /// Liveness check. Falls back to the root path when the health
    /// endpoint is unreachable or answers with something other than JSON.
    /// An HTTP error status is reported as is.
    pub async fn health(&self) -> Envelope<Value> {
        let primary = self
            .get::<Value>(&self.config.endpoints.health, QueryParams::new())
            .await;
        match primary.error_code() {
            Some(ErrorCode::Network | ErrorCode::MalformedResponse) => {
                debug!(error = primary.error_message(), "health endpoint failed, trying root");
                self.get::<Value>("/", QueryParams::new()).await
            }
            _ => primary,
        }
    }

    async fn send_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Envelope<T> {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => {
                return Envelope::failure(
                    ErrorCode::Unknown,
                    format!("failed to encode request body: {e}"),
                )
            }
        };
        self.request(endpoint, RequestOptions::new(method).with_body(body))
            .await
    }
}

fn transport_failure<T>(error: &reqwest::Error) -> Envelope<T> {
    if error.is_builder() {
        return Envelope::failure(ErrorCode::Unknown, error.to_string());
    }
    if error.is_timeout() {
        return Envelope::failure(ErrorCode::Network, TIMEOUT_MESSAGE);
    }
    let message = error.to_string();
    if message.is_empty() {
        Envelope::failure(ErrorCode::Network, "Network error")
    } else {
        Envelope::failure(ErrorCode::Network, message)
    }
}

fn interpret_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Envelope<T> {
    if !status.is_success() {
        let message = server_message(body).unwrap_or_else(|| GENERIC_HTTP_ERROR.to_string());
        return Envelope::failure(ErrorCode::Http(status.as_u16()), message);
    }

    match parse_body::<T>(body) {
        Ok(data) => Envelope::ok(data),
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "response did not match expected schema");
            Envelope::failure(ErrorCode::MalformedResponse, format!("Malformed response: {e}"))
        }
    }
}

/// An empty body decodes as JSON `null`, which satisfies `()` and `Option`.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice(b"null")
    } else {
        serde_json::from_slice(body)
    }
}

/// `message` (or FastAPI's `detail`) from a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(body).ok()?;
    ["message", "detail"]
        .iter()
        .filter_map(|key| json.get(*key).and_then(Value::as_str))
        .find(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn empty_body_is_unit() {
        let _: () = parse_body(b"").unwrap();
        assert!(parse_body::<Vec<u8>>(b"  ").is_err());
    }

    #[test]
    fn server_message_prefers_message_then_detail() {
        assert_eq!(
            server_message(br#"{"message":"bad","detail":"worse"}"#).as_deref(),
            Some("bad")
        );
        assert_eq!(
            server_message(br#"{"detail":"Not Found"}"#).as_deref(),
            Some("Not Found")
        );
        assert_eq!(server_message(br#"{"message":""}"#), None);
        assert_eq!(server_message(b"<html>oops</html>"), None);
    }

    #[test]
    fn non_success_status_uses_generic_message() {
        let env: Envelope<Value> = interpret_response(StatusCode::BAD_GATEWAY, b"gateway down");
        assert_eq!(env.error_message(), GENERIC_HTTP_ERROR);
        assert_eq!(env.error_code(), Some(&ErrorCode::Http(502)));
    }

    #[test]
    fn schema_mismatch_is_malformed() {
        let env: Envelope<Vec<String>> = interpret_response(StatusCode::OK, br#"{"not":"a list"}"#);
        assert_eq!(env.error_code(), Some(&ErrorCode::MalformedResponse));
    }
}
