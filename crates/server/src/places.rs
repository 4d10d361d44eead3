//! Google Places text search for nearby doctors

use std::time::Duration;

use healthcare_core::doctor::{MAX_RESULTS, SEARCH_RADIUS_METERS};
use healthcare_core::{AssistantError, DoctorResult, SearchArea};
use serde::Deserialize;

use crate::ai::record_upstream;

const API_BASE: &str = "https://maps.googleapis.com";
const PROVIDER: &str = "places";

/// Client for the Places text search endpoint
#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    rating: Option<f64>,
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    open_now: Option<bool>,
}

impl From<Place> for DoctorResult {
    fn from(place: Place) -> Self {
        DoctorResult {
            name: place.name,
            address: place.formatted_address,
            rating: place.rating,
            open_now: place.opening_hours.and_then(|h| h.open_now),
        }
    }
}

impl PlacesClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key,
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Search for doctors of a specialty within 15 km of the area.
    ///
    /// Returns at most `MAX_RESULTS` listings; an empty vector means the API
    /// found nothing. A non-2xx status, an error field or an error status is an
    /// upstream error.
    pub async fn search_doctors(
        &self,
        specialty: &str,
        area: &SearchArea,
    ) -> Result<Vec<DoctorResult>, AssistantError> {
        let result = self.text_search(specialty, area).await;
        record_upstream(PROVIDER, &result);
        result
    }

    async fn text_search(
        &self,
        specialty: &str,
        area: &SearchArea,
    ) -> Result<Vec<DoctorResult>, AssistantError> {
        let radius = SEARCH_RADIUS_METERS.to_string();
        let mut params = vec![
            ("query", area.query_for(specialty)),
            ("radius", radius),
            ("key", self.api_key.clone()),
        ];
        if let SearchArea::Coordinates {
            latitude,
            longitude,
        } = area
        {
            params.push(("location", format!("{latitude},{longitude}")));
        }

        tracing::debug!(query = %params[0].1, "Places text search");

        let response = self
            .http
            .get(format!("{}/maps/api/place/textsearch/json", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| AssistantError::upstream(PROVIDER, format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TextSearchResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error_message)
                .unwrap_or_else(|| status.to_string());
            return Err(AssistantError::upstream(PROVIDER, message));
        }

        let body: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::upstream(PROVIDER, format!("Invalid response: {e}")))?;

        if let Some(message) = body.error_message {
            return Err(AssistantError::upstream(PROVIDER, message));
        }
        if !matches!(body.status.as_str(), "OK" | "ZERO_RESULTS" | "") {
            return Err(AssistantError::upstream(PROVIDER, body.status));
        }

        Ok(body
            .results
            .into_iter()
            .take(MAX_RESULTS)
            .map(DoctorResult::from)
            .collect())
    }
}
