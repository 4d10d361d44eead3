//! Chat endpoint
//!
//! Routes each message to a canned reply, the doctor search, or one of the
//! AI providers. Provider failures become `ChatFailure`, which still answers
//! with status 200.

use axum::{Extension, Json, extract::State};
use healthcare_core::doctor::{self, DoctorQuery};
use healthcare_core::{
    AssistantError, ConversationMemory, Route, SearchArea, build_final_prompt, format_prompt,
};
use serde::{Deserialize, Serialize};

use crate::ai::CompletionProvider;
use crate::error::ChatFailure;
use crate::middleware::ClientIp;
use crate::state::AppState;

/// Reply when doctor search is requested but no places key is configured
pub const DOCTOR_SEARCH_UNAVAILABLE: &str = "Doctor search is currently unavailable.";

/// Request body for chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub session_id: Option<String>,
}

/// Response body for chat
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// POST /chat/ — answer a chat message
pub async fn chat(
    State(state): State<AppState>,
    Extension(client_ip): Extension<ClientIp>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatFailure> {
    let route = healthcare_core::route(&body.prompt);
    tracing::info!(route = route.name(), "Chat request");
    metrics::counter!("chat_requests_total", "route" => route.name()).increment(1);

    let response = match &route {
        Route::Identity | Route::Greeting => {
            route.canned_reply().unwrap_or_default().to_string()
        }
        Route::DoctorSearch(query) => find_doctors(&state, query, &body, client_ip).await,
        Route::Reasoning => {
            let provider = match &state.reasoning {
                Some(provider) => provider.clone(),
                None => {
                    tracing::warn!("Reasoning provider not configured, using general provider");
                    state.general.clone()
                }
            };
            converse(&state, provider.as_ref(), &body).await?
        }
        Route::General => converse(&state, state.general.as_ref(), &body).await?,
    };

    Ok(Json(ChatResponse::new(response)))
}

/// Conversation key; without an explicit session id the turn is ephemeral
fn session_key(body: &ChatRequest) -> Option<&str> {
    body.session_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Ask a provider, with the session's recent turns as context
async fn converse(
    state: &AppState,
    provider: &dyn CompletionProvider,
    body: &ChatRequest,
) -> Result<String, AssistantError> {
    let formatted = format_prompt(&body.prompt);
    let key = session_key(body);

    let history = match key {
        Some(key) => state.sessions.record_user(key, &body.prompt),
        None => {
            let mut memory = ConversationMemory::new();
            memory.push_user(body.prompt.as_str());
            memory.transcript()
        }
    };

    let prompt = build_final_prompt(&history, &formatted);
    tracing::debug!(provider = provider.name(), "Dispatching prompt");

    let reply = provider.complete(&prompt).await?;

    if let Some(key) = key {
        state.sessions.record_ai(key, &reply);
    }
    Ok(reply)
}

/// Look up doctors; every outcome, including failures, becomes reply text
async fn find_doctors(
    state: &AppState,
    query: &DoctorQuery,
    body: &ChatRequest,
    client_ip: ClientIp,
) -> String {
    match search_doctors(state, query, body, client_ip).await {
        Ok(reply) => reply,
        Err(AssistantError::Config(reason)) => {
            tracing::warn!(reason = %reason, "Doctor search disabled");
            DOCTOR_SEARCH_UNAVAILABLE.to_string()
        }
        Err(AssistantError::Upstream { message, .. }) => {
            tracing::error!(error = %message, "Doctor search failed");
            doctor::error_message(&message)
        }
        Err(other) => {
            tracing::error!(error = %other, "Doctor search failed");
            doctor::error_message(&other.to_string())
        }
    }
}

async fn search_doctors(
    state: &AppState,
    query: &DoctorQuery,
    body: &ChatRequest,
    client_ip: ClientIp,
) -> Result<String, AssistantError> {
    let places = state.places.as_ref().ok_or_else(|| {
        AssistantError::Config("GOOGLE_PLACES_API_KEY not set".to_string())
    })?;

    let area = match (&query.location, body.latitude, body.longitude) {
        (Some(location), _, _) => SearchArea::Named(location.clone()),
        (None, Some(latitude), Some(longitude)) => SearchArea::Coordinates {
            latitude,
            longitude,
        },
        _ => SearchArea::Named(state.location.resolve_city(client_ip.0).await),
    };

    tracing::info!(
        specialty = %query.specialty,
        area = %area.label(),
        "Doctor search"
    );

    let results = places.search_doctors(&query.specialty, &area).await?;
    Ok(doctor::render_results(
        &query.specialty,
        &area.label(),
        &results,
    ))
}
