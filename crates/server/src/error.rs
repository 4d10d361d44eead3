//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use healthcare_core::AssistantError;

use crate::routes::chat::ChatResponse;

/// Reply sent to the user whenever a chat request fails
pub const APOLOGY: &str = "I'm sorry, but I couldn't process your request. Please try again.";

/// A failed chat request.
///
/// Chat failures are never surfaced as HTTP errors: the cause is logged and
/// the client receives the apology text with status 200.
#[derive(Debug)]
pub struct ChatFailure(pub AssistantError);

impl From<AssistantError> for ChatFailure {
    fn from(err: AssistantError) -> Self {
        ChatFailure(err)
    }
}

impl IntoResponse for ChatFailure {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, kind = self.0.kind(), "Chat request failed");
        metrics::counter!("chat_failures_total", "kind" => self.0.kind()).increment(1);

        (StatusCode::OK, Json(ChatResponse::new(APOLOGY))).into_response()
    }
}
