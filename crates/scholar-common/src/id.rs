use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Message ids must stay unique within a session even when two messages
/// land in the same millisecond, so they are uuid-backed.
pub fn new_message_id() -> String {
    format!("msg_{}", new_id())
}

/// `<prefix>_<unix-millis>_<9 random base36 chars>`.
pub fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

/// Opaque chat session token, generated client-side once per chat flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(generate_id("session"))
    }

    /// Wrap an id handed back by the backend or restored by the caller.
    pub fn from_existing(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
