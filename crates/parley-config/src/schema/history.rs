//! Conversation history bounds.

use serde::{Deserialize, Serialize};

/// Per-session history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum turns kept per session. `0` keeps everything.
    pub capacity: usize,
}

impl HistoryConfig {
    /// The effective cap, or `None` when history is unbounded.
    pub fn limit(&self) -> Option<usize> {
        (self.capacity > 0).then_some(self.capacity)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 12 }
    }
}
