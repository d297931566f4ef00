//! Availability-aware wrapper around a [`ModelClient`].
//!
//! The adapter is built once at startup. If the client cannot be
//! constructed the adapter is kept in the `Unavailable` state so the
//! server still starts and each request can answer with an error.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::gemini::{GeminiClient, GeminiConfig};
use crate::{AiError, ModelClient, Turn};

pub enum ModelAdapter {
    Ready(Arc<dyn ModelClient>),
    Unavailable { reason: String },
}

impl ModelAdapter {
    /// Construct a Gemini-backed adapter. Never fails; construction errors
    /// are logged and recorded as the unavailability reason.
    pub fn gemini(config: GeminiConfig) -> Self {
        let model = config.model.clone();
        match GeminiClient::new(config) {
            Ok(client) => {
                info!(model = %model, "Gemini client ready");
                Self::Ready(Arc::new(client))
            }
            Err(e) => {
                error!(model = %model, error = %e, "Gemini client unavailable");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn ready(client: Arc<dyn ModelClient>) -> Self {
        Self::Ready(client)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }

    /// Generate the reply text for `history`.
    pub async fn generate(&self, history: &[Turn]) -> Result<String, AiError> {
        let client = match self {
            Self::Ready(client) => client,
            Self::Unavailable { reason } => return Err(AiError::NotConfigured(reason.clone())),
        };

        let response = client.generate(history).await?;
        debug!(
            model = %client.model_name(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            total_tokens = response.usage.total_tokens(),
            "generate complete"
        );
        Ok(response.content)
    }
}

impl std::fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(client) => f
                .debug_tuple("Ready")
                .field(&client.model_name())
                .finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
