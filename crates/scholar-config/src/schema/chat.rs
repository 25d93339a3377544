//! Chat flow configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Messages requested when loading a user's history (valid range: 1-500).
    pub history_limit: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { history_limit: 50 }
    }
}
