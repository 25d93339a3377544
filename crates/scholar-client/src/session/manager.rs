//! Session struct and history management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use scholar_common::SessionId;
use scholar_config::ChatConfig;

use super::types::{ChatEntry, SessionState};
use crate::types::ChatMessage;
use crate::ChatBackend;

/// One conversation thread and its client-side state.
pub struct ChatSession {
    pub(super) backend: Arc<dyn ChatBackend>,
    /// Generated once; never replaced by a send.
    pub(super) session_id: SessionId,
    /// Needed for history loads; sent with each message when present.
    pub(super) user_id: Option<String>,
    /// Insertion order is display order.
    pub(super) entries: Vec<ChatEntry>,
    /// Last failure text, cleared when the next send starts.
    pub(super) error: Option<String>,
    /// Follow-up prompts from the latest reply.
    pub(super) suggestions: Vec<String>,
    pub(super) history_limit: u32,
    /// Whether a send or history load is in flight.
    pub(super) busy: AtomicBool,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            session_id: SessionId::generate(),
            user_id: None,
            entries: Vec::new(),
            error: None,
            suggestions: Vec::new(),
            history_limit: ChatConfig::default().history_limit,
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Resume an existing thread instead of starting a new one.
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter().map(|entry| &entry.message)
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.entries.last().map(|entry| &entry.message)
    }

    pub fn message_count(&self) -> usize {
        self.entries.len()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn state(&self) -> SessionState {
        if self.busy.load(Ordering::Acquire) {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    /// Drop local history, error and suggestions. The session id is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.error = None;
        self.suggestions.clear();
    }
}
