//! Static pages.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../templates/index.html");
const SPEAK_HTML: &str = include_str!("../../templates/speak.html");

/// Landing page. Every visit starts a new conversation.
pub(super) async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.cookies.resolve(&headers);
    state.store.clear(&session.id).await;
    tracing::debug!(session = %session.id, new = session.is_new, "Conversation reset");

    let mut response = Html(INDEX_HTML).into_response();
    state.cookies.attach(&mut response, &session);
    response
}

pub(super) async fn speak() -> Html<&'static str> {
    Html(SPEAK_HTML)
}
