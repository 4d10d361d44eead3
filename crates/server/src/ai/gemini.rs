//! Google Gemini generateContent client

use std::time::Duration;

use async_trait::async_trait;
use healthcare_core::AssistantError;
use serde::{Deserialize, Serialize};

use super::{CompletionProvider, record_upstream};

const API_BASE: &str = "https://generativelanguage.googleapis.com";
const PROVIDER: &str = "gemini";

/// Client for the Gemini generative language API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct ApiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key,
            model,
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let request = ApiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::upstream(PROVIDER, format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if let Ok(api_err) = serde_json::from_str::<ApiError>(&body) {
                return Err(AssistantError::upstream(
                    PROVIDER,
                    format!("{status}: {}", api_err.error.message),
                ));
            }
            return Err(AssistantError::upstream(PROVIDER, format!("{status}: {body}")));
        }

        let parsed = response
            .json::<ApiResponse>()
            .await
            .map_err(|e| AssistantError::upstream(PROVIDER, format!("Failed to parse response: {e}")))?;

        // Candidates can come back without content when blocked by safety filters
        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .next()
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AssistantError::upstream(PROVIDER, "No text content in response"));
        }
        Ok(text)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let result = self.generate(prompt).await;
        record_upstream(PROVIDER, &result);
        result
    }
}
