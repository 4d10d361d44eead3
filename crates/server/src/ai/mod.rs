//! AI completion providers

pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use healthcare_core::AssistantError;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// A text completion backend.
///
/// The chat handler only sees this trait, so providers can be swapped for
/// stubs in tests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name used in logs and metrics
    fn name(&self) -> &str;

    /// Send a single prompt and return the generated text
    async fn complete(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Record the outcome of an upstream call
pub(crate) fn record_upstream<T>(provider: &str, result: &Result<T, AssistantError>) {
    let outcome = if result.is_ok() { "success" } else { "error" };
    metrics::counter!(
        "upstream_requests_total",
        "provider" => provider.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
