//! Process-lifetime configuration: file settings plus the secrets and
//! instruction text resolved at startup.

use std::fmt;

use crate::instructions::load_system_instruction;
use crate::schema::ParleyConfig;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Immutable configuration shared by every request.
#[derive(Clone)]
pub struct AppConfig {
    pub settings: ParleyConfig,
    /// Read verbatim from the environment; format is not checked here.
    pub api_key: Option<String>,
    pub system_instruction: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("settings", &self.settings)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("system_instruction", &self.system_instruction)
            .finish()
    }
}

impl AppConfig {
    /// Resolve the API key from the environment and read the instruction
    /// file. Never fails: both inputs degrade instead.
    pub fn assemble(settings: ParleyConfig) -> Self {
        let system_instruction = load_system_instruction(&settings.instructions);
        Self {
            api_key: api_key_from_env(),
            system_instruction,
            settings,
        }
    }

    /// Effective history cap, `None` when unbounded.
    pub fn history_capacity(&self) -> Option<usize> {
        self.settings.history.limit()
    }
}

/// Read the API key from [`API_KEY_ENV`].
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}
