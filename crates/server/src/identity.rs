//! Identity provider credential check
//!
//! Standalone capability: no route calls this, and a successful check does
//! not issue tokens or create sessions.

use std::time::Duration;

use healthcare_core::AssistantError;
use serde::Serialize;

const PROVIDER: &str = "identity";

/// Result of a credential check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated,
    Failed,
}

impl AuthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthStatus::Authenticated => "Authenticated",
            AuthStatus::Failed => "Authentication Failed",
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    user_id: &'a str,
    password: &'a str,
}

/// Client that posts credentials to an identity provider
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    url: String,
}

impl IdentityClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            http,
            url: url.into(),
        }
    }

    /// Post the credentials; only HTTP 200 counts as authenticated.
    ///
    /// Network failures are errors, not `AuthStatus::Failed`.
    pub async fn authenticate(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<AuthStatus, AssistantError> {
        let response = self
            .http
            .post(&self.url)
            .json(&Credentials { user_id, password })
            .send()
            .await
            .map_err(|e| AssistantError::upstream(PROVIDER, format!("HTTP request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::OK {
            Ok(AuthStatus::Authenticated)
        } else {
            tracing::debug!(status = %response.status(), "Identity provider rejected credentials");
            Ok(AuthStatus::Failed)
        }
    }
}
