//! System instruction source.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Where the system instruction comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionsConfig {
    /// Relative paths resolve against the executable's directory.
    pub path: String,
    /// Used when the file cannot be read.
    pub fallback: String,
}

impl Default for InstructionsConfig {
    fn default() -> Self {
        Self {
            path: "instructions.txt".into(),
            fallback: DEFAULT_SYSTEM_INSTRUCTION.into(),
        }
    }
}
