//! Typed wrappers over the backend's REST surface.
//!
//! Each service holds a clone of the shared [`ApiClient`](crate::ApiClient)
//! and does nothing beyond path templating and, for auth, credential
//! bookkeeping. Every call resolves to an [`Envelope`](crate::Envelope).

mod applications;
mod auth;
mod chat;
mod scholarships;

#[cfg(test)]
mod tests;

pub use applications::ApplicationService;
pub use auth::AuthService;
pub use chat::ChatService;
pub use scholarships::ScholarshipService;

use serde::de::IgnoredAny;

use crate::envelope::Envelope;

/// Endpoints with no meaningful reply body accept whatever JSON comes back.
pub(crate) fn acknowledge(envelope: Envelope<IgnoredAny>) -> Envelope<()> {
    envelope.map(|_| ())
}

/// Page size used when a caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Look-ahead window for deadline queries.
pub const DEFAULT_DEADLINE_DAYS: u32 = 30;
