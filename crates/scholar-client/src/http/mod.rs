//! Request envelope layer over `reqwest`.
//!
//! Every call resolves to an [`Envelope`](crate::Envelope); transport
//! failures, timeouts, error statuses and schema mismatches are all
//! folded into its error side.

mod client;
mod request;


pub use client::ApiClient;
pub use request::RequestOptions;
