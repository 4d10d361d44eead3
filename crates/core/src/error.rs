use thiserror::Error;

/// Assistant error types
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{provider} error: {message}")]
    Upstream { provider: String, message: String },

    #[error("Could not parse request: {0}")]
    ParseMiss(String),
}

impl AssistantError {
    /// Build an upstream error for the named provider
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AssistantError::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Short label for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            AssistantError::Config(_) => "config",
            AssistantError::Upstream { .. } => "upstream",
            AssistantError::ParseMiss(_) => "parse_miss",
        }
    }
}
