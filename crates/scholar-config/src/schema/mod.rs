//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults pointing at the hosted backend.

mod api;
mod chat;
mod retry;
mod system;

pub use api::*;
pub use chat::*;
pub use retry::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Read once at startup and treated as immutable afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarConfig {
    pub api: ApiConfig,
    pub retry: RetryConfig,
    pub chat: ChatConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
