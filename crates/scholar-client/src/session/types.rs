//! Session types and concurrency guards.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::envelope::ErrorInfo;
use crate::types::ChatMessage;

/// Assistant text shown when the backend could not answer.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// Delivery status of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    /// Shown locally, backend has not answered yet.
    Pending,
    /// Acknowledged by the backend, or loaded from it.
    Confirmed,
    /// The send this message started did not get a reply.
    Failed,
    /// Generated on the client, never seen by the backend.
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub message: ChatMessage,
    pub status: MessageStatus,
}

impl ChatEntry {
    pub(crate) fn new(message: ChatMessage, status: MessageStatus) -> Self {
        Self { message, status }
    }
}

/// What a call to `send_message` did.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input, or a send was already in flight. History untouched.
    Ignored,
    Replied,
    /// The fallback reply was appended; carries the backend error.
    Failed(ErrorInfo),
}

/// What a call to `load_history` did.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryLoad {
    /// No user id, or a send was in flight.
    Skipped,
    Loaded(usize),
    Failed(ErrorInfo),
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the future is cancelled or an early return occurs.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy flag. Returns `None` if already held.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
