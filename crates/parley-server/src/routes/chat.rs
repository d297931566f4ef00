//! `POST /chat`: one conversational exchange.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parley_ai::Turn;
use parley_common::SessionId;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::ChatError;
use crate::state::AppState;

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct ChatReply {
    response: String,
}

pub(super) async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let session = state.cookies.resolve(&headers);

    let mut response = match exchange(&state, &session.id, &body).await {
        Ok(reply) => Json(ChatReply { response: reply }).into_response(),
        Err(e) => e.into_response(),
    };
    state.cookies.attach(&mut response, &session);
    response
}

/// Validate, record the user turn, ask the model, record the reply.
///
/// A failed model call leaves the user turn in place; the next request
/// sends it again alongside the new message.
async fn exchange(
    state: &AppState,
    session: &SessionId,
    body: &[u8],
) -> Result<String, ChatError> {
    if !state.adapter.is_available() {
        warn!(
            session = %session,
            reason = state.adapter.unavailable_reason().unwrap_or_default(),
            "Chat rejected: model unavailable"
        );
        return Err(ChatError::Unavailable);
    }

    let message = parse_message(body)?;

    state.store.append(session, Turn::user(message)).await;
    state.store.enforce_capacity(session).await;

    let history = state.store.get(session).await;
    debug!(session = %session, turns = history.len(), "Calling model");

    let reply = state
        .adapter
        .generate(history.turns())
        .await
        .map_err(|e| {
            error!(session = %session, error = %e, "Model call failed");
            ChatError::Remote
        })?;

    state.store.append(session, Turn::model(reply.clone())).await;
    state.store.enforce_capacity(session).await;

    Ok(reply)
}

/// Extract the trimmed, non-empty `message` field.
fn parse_message(body: &[u8]) -> Result<String, ChatError> {
    let request: ChatRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Rejected chat body");
        ChatError::InvalidBody
    })?;

    let message = request.message.unwrap_or_default();
    let message = message.trim();
    if message.is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    Ok(message.to_string())
}
