//! Best-effort city lookup from the caller's IP address

use std::net::IpAddr;
use std::time::Duration;

use healthcare_core::AssistantError;
use serde::Deserialize;

use crate::ai::record_upstream;

const API_BASE: &str = "https://ipinfo.io";
const PROVIDER: &str = "ipinfo";

/// Returned whenever the lookup fails
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Client for the ipinfo lookup API
#[derive(Clone)]
pub struct LocationClient {
    http: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IpInfo {
    city: Option<String>,
}

impl LocationClient {
    pub fn new(token: Option<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            http,
            token,
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Resolve a city for the given address, or `UNKNOWN_LOCATION` on any
    /// failure. Without an address ipinfo reports the server's own location.
    pub async fn resolve_city(&self, ip: Option<IpAddr>) -> String {
        let result = self.lookup(ip).await;
        record_upstream(PROVIDER, &result);
        match result {
            Ok(city) => city,
            Err(e) => {
                tracing::warn!(error = %e, "Location lookup failed");
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    async fn lookup(&self, ip: Option<IpAddr>) -> Result<String, AssistantError> {
        let url = match ip {
            Some(ip) => format!("{}/{ip}/json", self.base_url),
            None => format!("{}/json", self.base_url),
        };

        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AssistantError::upstream(PROVIDER, format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AssistantError::upstream(
                PROVIDER,
                format!("unexpected status {}", response.status()),
            ));
        }

        let info: IpInfo = response
            .json()
            .await
            .map_err(|e| AssistantError::upstream(PROVIDER, format!("Failed to parse response: {e}")))?;

        info.city
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AssistantError::upstream(PROVIDER, "no city in response"))
    }
}
