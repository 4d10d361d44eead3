//! Root liveness endpoint

use axum::Json;
use serde::Serialize;

/// Root response
#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
}

/// GET / - Confirm the backend is up
pub async fn get() -> Json<RootResponse> {
    Json(RootResponse {
        message: "FastAPI Backend is Running Successfully!",
    })
}
