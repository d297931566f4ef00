//! Client-side configuration.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub(super) struct ClientConfig {
    gemini_api_key: Option<String>,
    system_instruction: String,
}

/// Hands the API key and system instruction to the browser for the voice
/// page, which talks to the model directly.
pub(super) async fn api_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        gemini_api_key: state.api_key.as_deref().map(str::to_owned),
        system_instruction: state.system_instruction.to_string(),
    })
}
