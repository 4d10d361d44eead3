//! Server configuration

use std::time::Duration;

use thiserror::Error;

/// Default identity provider used by the authentication stub
pub const DEFAULT_IDENTITY_PROVIDER_URL: &str = "https://dev-56640944.okta.com";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No Gemini API key found! Please set GEMINI_API_KEY")]
    MissingGeminiKey,

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    pub upstream_timeout: Duration,
    pub max_sessions: usize,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub google_places_api_key: Option<String>,
    pub ipinfo_api_key: Option<String>,
    pub identity_provider_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `GEMINI_API_KEY` is the only required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = optional("GEMINI_API_KEY").ok_or(ConfigError::MissingGeminiKey)?;

        Ok(Self {
            bind_address: optional("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".into()),
            cors_origins: optional("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| vec!["http://localhost:3000".to_string()]),
            rate_limit_rps: parse_or("RATE_LIMIT_RPS", 20)?,
            upstream_timeout: Duration::from_secs(parse_or("UPSTREAM_TIMEOUT_SECS", 30)?),
            max_sessions: parse_or("MAX_SESSIONS", 1024)?,
            gemini_api_key,
            gemini_model: optional("GEMINI_MODEL").unwrap_or_else(|| "gemini-pro".into()),
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_model: optional("OPENAI_MODEL").unwrap_or_else(|| "gpt-4".into()),
            google_places_api_key: optional("GOOGLE_PLACES_API_KEY"),
            ipinfo_api_key: optional("IPINFO_API_KEY"),
            identity_provider_url: optional("IDENTITY_PROVIDER_URL")
                .unwrap_or_else(|| DEFAULT_IDENTITY_PROVIDER_URL.into()),
        })
    }

    /// Configuration for tests and embedding: defaults plus the given Gemini key
    pub fn with_gemini_key(gemini_api_key: impl Into<String>) -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            rate_limit_rps: 20,
            upstream_timeout: Duration::from_secs(30),
            max_sessions: 1024,
            gemini_api_key: gemini_api_key.into(),
            gemini_model: "gemini-pro".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4".to_string(),
            google_places_api_key: None,
            ipinfo_api_key: None,
            identity_provider_url: DEFAULT_IDENTITY_PROVIDER_URL.to_string(),
        }
    }
}

/// Non-empty environment variable
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
