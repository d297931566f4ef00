//! HTTP surface.
//!
//! - `GET /`           landing page; starts a fresh conversation
//! - `GET /speak`      voice page, no session side effects
//! - `POST /chat`      `{"message": ...}` → `{"response": ...}`
//! - `GET /api/config` API key and system instruction for client-side code

mod chat;
mod config;
mod pages;

#[cfg(test)]
mod tests;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/speak", get(pages::speak))
        .route("/chat", post(chat::chat))
        .route("/api/config", get(config::api_config))
        .with_state(state)
}
