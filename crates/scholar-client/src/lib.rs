//! Client for the scholarship-discovery backend.
//!
//! Provides:
//! - A request envelope layer that turns every HTTP call into a uniform
//!   success/error result with timeout cancellation and bearer auth
//! - Credential storage with a persisted mirror
//! - A retry helper with linear backoff
//! - Typed services for chat, auth, scholarships and applications
//! - A chat session flow with optimistic message history

pub mod credentials;
pub mod endpoint;
pub mod envelope;
pub mod http;
pub mod retry;
pub mod services;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;

pub use credentials::CredentialStore;
pub use endpoint::{fill_path, item_path, QueryParams};
pub use envelope::{Envelope, ErrorCode, ErrorInfo};
pub use http::{ApiClient, RequestOptions};
pub use retry::{retry_fallible, retry_request, RetryPolicy};
pub use services::{ApplicationService, AuthService, ChatService, ScholarshipService};
pub use session::{ChatSession, SendOutcome};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use types::{ChatMessage, ChatRequest, ChatResponse};

/// The backend a [`ChatSession`] talks to.
///
/// Implemented by [`ChatService`] over HTTP; tests substitute doubles.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_chat(&self, request: ChatRequest) -> Envelope<ChatResponse>;

    async fn fetch_history(&self, user_id: &str, limit: u32) -> Envelope<Vec<ChatMessage>>;
}
