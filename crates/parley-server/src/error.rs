//! Endpoint-level failures and their HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Everything `/chat` can fail with. Display strings are what the client
/// sees; internal detail stays in the server log.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Server Error: The Gemini API isn't configured. Check the server logs.")]
    Unavailable,

    #[error("Message must not be empty.")]
    EmptyMessage,

    #[error("Request body must be JSON like {{\"message\": \"...\"}}.")]
    InvalidBody,

    #[error("Sorry, something went wrong on the server. Please try again.")]
    Remote,
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyMessage | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::Unavailable | Self::Remote => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
