//! Chat session flow.
//!
//! A `ChatSession` owns one conversation's client-side state: the session
//! id, the message history with per-entry delivery status, the last error
//! and the reply suggestions. Sends are optimistic: the user's message is
//! visible before the backend answers.

mod chat;
mod manager;
mod types;


pub use manager::ChatSession;
pub use types::{ChatEntry, HistoryLoad, MessageStatus, SendOutcome, SessionState, FALLBACK_REPLY};
