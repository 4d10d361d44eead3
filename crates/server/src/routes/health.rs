//! Health check endpoint

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    reasoning_provider: bool,
    doctor_search: bool,
}

/// GET /health - Report server health and which optional features are enabled
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        reasoning_provider: state.reasoning.is_some(),
        doctor_search: state.places.is_some(),
    })
}
