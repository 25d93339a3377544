//! Uniform success/error wrapper around every backend call.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Machine-readable failure class carried in [`ErrorInfo::code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// Transport failure or timeout (`NETWORK_ERROR`).
    Network,
    /// Non-2xx status reported by the server, serialized as the number.
    Http(u16),
    /// The request could not be built or failed in an unexpected way.
    Unknown,
    /// A 2xx body did not match the expected schema.
    MalformedResponse,
    /// A retried producer returned an error instead of an envelope.
    Retry,
    /// The retry helper ran with no attempts.
    MaxRetries,
    /// Any other code received from elsewhere.
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            ErrorCode::Network => Cow::Borrowed("NETWORK_ERROR"),
            ErrorCode::Http(status) => Cow::Owned(status.to_string()),
            ErrorCode::Unknown => Cow::Borrowed("UNKNOWN_ERROR"),
            ErrorCode::MalformedResponse => Cow::Borrowed("MALFORMED_RESPONSE"),
            ErrorCode::Retry => Cow::Borrowed("RETRY_ERROR"),
            ErrorCode::MaxRetries => Cow::Borrowed("MAX_RETRIES"),
            ErrorCode::Other(code) => Cow::Borrowed(code),
        }
    }

    /// 4xx responses are not worth retrying.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorCode::Http(status) if (400..500).contains(status))
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "NETWORK_ERROR" => ErrorCode::Network,
            "UNKNOWN_ERROR" => ErrorCode::Unknown,
            "MALFORMED_RESPONSE" => ErrorCode::MalformedResponse,
            "RETRY_ERROR" => ErrorCode::Retry,
            "MAX_RETRIES" => ErrorCode::MaxRetries,
            other => match other.parse::<u16>() {
                Ok(status) if (100..600).contains(&status) => ErrorCode::Http(status),
                _ => ErrorCode::Other(other.to_string()),
            },
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(ErrorCode::from(code.as_str()))
    }
}

/// Failure details of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl ErrorInfo {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ErrorInfo {}

/// Result of a backend call.
///
/// Exactly one of `data` and `error` is present, matching `success`.
/// The fields are private so the only way in is [`Envelope::ok`] or
/// [`Envelope::fail`].
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
    timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn fail(error: ErrorInfo) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            timestamp: Utc::now(),
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::fail(ErrorInfo::new(code, message))
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Success with data present.
    pub fn is_api_success(&self) -> bool {
        self.success && self.data.is_some()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn error_code(&self) -> Option<&ErrorCode> {
        self.error.as_ref().and_then(|e| e.code.as_ref())
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Error text for display, with a generic fallback.
    pub fn error_message(&self) -> &str {
        self.error
            .as_ref()
            .map(|e| e.message.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
    }

    pub fn is_network_error(&self) -> bool {
        let Some(error) = &self.error else {
            return false;
        };
        if error.code == Some(ErrorCode::Network) {
            return true;
        }
        let message = error.message.to_lowercase();
        message.contains("network") || message.contains("timeout")
    }

    pub fn is_auth_error(&self) -> bool {
        let Some(error) = &self.error else {
            return false;
        };
        if matches!(error.code, Some(ErrorCode::Http(401 | 403))) {
            return true;
        }
        let message = error.message.to_lowercase();
        message.contains("unauthorized") || message.contains("forbidden")
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn into_result(self) -> Result<T, ErrorInfo> {
        match (self.data, self.error) {
            (Some(data), _) if self.success => Ok(data),
            (_, Some(error)) => Err(error),
            _ => Err(ErrorInfo::new(ErrorCode::Unknown, DEFAULT_ERROR_MESSAGE)),
        }
    }

    /// Transform the payload, keeping the failure and timestamp untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            timestamp: self.timestamp,
        }
    }
}
