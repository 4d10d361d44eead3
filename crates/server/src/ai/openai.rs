//! OpenAI Chat Completions client

use std::time::Duration;

use async_trait::async_trait;
use healthcare_core::AssistantError;
use serde::{Deserialize, Serialize};

use super::{CompletionProvider, record_upstream};

const API_BASE: &str = "https://api.openai.com";
const PROVIDER: &str = "openai";

/// Client for the OpenAI Chat Completions API
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Request body for the Chat Completions API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

/// Response from the Chat Completions API
#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Error detail from the Chat Completions API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    /// Create a new client with the given API key and model
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

    /// Point the client at a different host (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send(&self, prompt: &str) -> Result<String, AssistantError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
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

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AssistantError::upstream(PROVIDER, "No choices in response"))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let result = self.send(prompt).await;
        record_upstream(PROVIDER, &result);
        result
    }
}
