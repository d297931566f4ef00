//! Remote model selection and generation parameters.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    /// Upper bound on reply length (valid range: 1-65536).
    pub max_output_tokens: u32,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Deadline for one generate call, in seconds (valid range: 1-600).
    pub request_timeout_secs: u64,
    pub api_base: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.5-flash".into(),
            max_output_tokens: 400,
            temperature: 0.6,
            request_timeout_secs: 60,
            api_base: DEFAULT_API_BASE.into(),
        }
    }
}
