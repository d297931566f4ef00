//! Model access for Parley.
//!
//! Provides the conversation types shared with the web layer, the
//! capacity-bounded [`ConversationHistory`], a Gemini API client, and the
//! [`ModelAdapter`] that lets callers check availability before use.

pub mod adapter;
pub mod gemini;
pub mod history;

use async_trait::async_trait;

pub use adapter::ModelAdapter;
pub use gemini::{GeminiClient, GeminiConfig};
pub use history::ConversationHistory;

/// A backend that turns a conversation into the next model reply.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Generate the reply to `history`, which ends with the user's turn.
    async fn generate(&self, history: &[Turn]) -> Result<AiResponse, AiError>;
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Wire name used by the Gemini `contents` array.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Model not configured: {0}")]
    NotConfigured(String),
}
