use async_trait::async_trait;
use scholar_common::SessionId;
use serde::de::IgnoredAny;
use tracing::debug;

use super::acknowledge;
use crate::endpoint::{item_path, QueryParams};
use crate::envelope::Envelope;
use crate::http::ApiClient;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::ChatBackend;

#[derive(Debug, Clone)]
pub struct ChatService {
    api: ApiClient,
}

impl ChatService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn send_message(
        &self,
        message: &str,
        session_id: Option<&SessionId>,
        user_id: Option<&str>,
    ) -> Envelope<ChatResponse> {
        self.send(ChatRequest {
            message: message.to_string(),
            session_id: session_id.cloned(),
            user_id: user_id.map(str::to_string),
        })
        .await
    }

    async fn send(&self, request: ChatRequest) -> Envelope<ChatResponse> {
        debug!(
            session = ?request.session_id.as_ref().map(SessionId::as_str),
            len = request.message.len(),
            "sending chat message"
        );
        self.api
            .post(&self.api.config().endpoints.chat, &request)
            .await
    }

    pub async fn chat_history(
        &self,
        user_id: &str,
        limit: u32,
        offset: u32,
    ) -> Envelope<Vec<ChatMessage>> {
        let query = QueryParams::new()
            .with("userId", user_id)
            .with("limit", limit)
            .with("offset", offset);
        self.api
            .get(&self.api.config().endpoints.chat_history, query)
            .await
    }

    pub async fn session_history(&self, session_id: &SessionId) -> Envelope<Vec<ChatMessage>> {
        let endpoint = item_path(&self.api.config().endpoints.chat_history, session_id.as_str());
        self.api.get(&endpoint, QueryParams::new()).await
    }

    pub async fn delete_chat_history(&self, user_id: &str) -> Envelope<()> {
        let query = QueryParams::new().with("userId", user_id);
        acknowledge(
            self.api
                .delete::<IgnoredAny>(&self.api.config().endpoints.chat_history, query)
                .await,
        )
    }

    pub fn generate_session_id(&self) -> SessionId {
        SessionId::generate()
    }
}

#[async_trait]
impl ChatBackend for ChatService {
    async fn send_chat(&self, request: ChatRequest) -> Envelope<ChatResponse> {
        self.send(request).await
    }

    async fn fetch_history(&self, user_id: &str, limit: u32) -> Envelope<Vec<ChatMessage>> {
        self.chat_history(user_id, limit, 0).await
    }
}
