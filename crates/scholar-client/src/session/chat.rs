//! Async send and history-load methods for ChatSession.

use chrono::Utc;
use tracing::{debug, warn};

use super::manager::ChatSession;
use super::types::{BusyGuard, ChatEntry, HistoryLoad, MessageStatus, SendOutcome, FALLBACK_REPLY};
use crate::types::{ChatMessage, ChatRequest};

impl ChatSession {
    /// Send `content` and record the reply.
    ///
    /// The user message is appended as `Pending` before the backend is
    /// called. On success it is confirmed and the assistant reply follows;
    /// on failure it is marked `Failed`, the error is recorded and
    /// [`FALLBACK_REPLY`] is appended in place of a reply.
    pub async fn send_message(&mut self, content: &str) -> SendOutcome {
        let content = content.trim();
        if content.is_empty() {
            return SendOutcome::Ignored;
        }
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!(session = %self.session_id, "send ignored, session busy");
            return SendOutcome::Ignored;
        };

        self.error = None;
        let pending = self.entries.len();
        self.entries.push(ChatEntry::new(
            ChatMessage::user(content),
            MessageStatus::Pending,
        ));

        let request = ChatRequest {
            message: content.to_string(),
            session_id: Some(self.session_id.clone()),
            user_id: self.user_id.clone(),
        };
        let envelope = self.backend.send_chat(request).await;
        let message = envelope.error_message().to_string();

        match envelope.into_result() {
            Ok(reply) => {
                if reply.session_id != self.session_id.as_str() {
                    debug!(ours = %self.session_id, theirs = %reply.session_id, "backend echoed a different session id");
                }
                self.entries[pending].status = MessageStatus::Confirmed;
                self.entries.push(ChatEntry::new(
                    ChatMessage::assistant(reply.message, reply.timestamp),
                    MessageStatus::Confirmed,
                ));
                self.suggestions = reply.suggestions;
                SendOutcome::Replied
            }
            Err(error) => {
                warn!(session = %self.session_id, error = %error, "chat send failed");
                self.entries[pending].status = MessageStatus::Failed;
                self.error = Some(message);
                self.suggestions.clear();
                self.entries.push(ChatEntry::new(
                    ChatMessage::assistant(FALLBACK_REPLY, Utc::now()),
                    MessageStatus::Local,
                ));
                SendOutcome::Failed(error)
            }
        }
    }

    /// Replace the whole history with the server's copy for this user.
    ///
    /// Local entries are discarded, not merged. On failure the history is
    /// left as it was and the error is recorded.
    pub async fn load_history(&mut self) -> HistoryLoad {
        let Some(user_id) = self.user_id.clone() else {
            debug!("history load skipped, no user id");
            return HistoryLoad::Skipped;
        };
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            return HistoryLoad::Skipped;
        };

        let envelope = self.backend.fetch_history(&user_id, self.history_limit).await;
        let message = envelope.error_message().to_string();

        match envelope.into_result() {
            Ok(messages) => {
                let count = messages.len();
                self.entries = messages
                    .into_iter()
                    .map(|m| ChatEntry::new(m, MessageStatus::Confirmed))
                    .collect();
                self.error = None;
                debug!(count, "chat history loaded");
                HistoryLoad::Loaded(count)
            }
            Err(error) => {
                warn!(error = %error, "failed to load chat history");
                self.error = Some(message);
                HistoryLoad::Failed(error)
            }
        }
    }
}
