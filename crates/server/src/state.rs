//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::ai::{CompletionProvider, GeminiClient, OpenAiClient};
use crate::config::Config;
use crate::location::LocationClient;
use crate::places::PlacesClient;
use crate::session::SessionStore;

const DEFAULT_MAX_SESSIONS: usize = 1024;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream clients and conversation memory shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// General-purpose generative provider
    pub general: Arc<dyn CompletionProvider>,
    /// Advanced-reasoning provider, if configured
    pub reasoning: Option<Arc<dyn CompletionProvider>>,
    /// Places lookup, if configured
    pub places: Option<PlacesClient>,
    pub location: LocationClient,
    pub sessions: SessionStore,
}

impl AppState {
    /// State with only a general provider; optional features are disabled
    pub fn new(general: Arc<dyn CompletionProvider>) -> Self {
        Self {
            general,
            reasoning: None,
            places: None,
            location: LocationClient::new(None, DEFAULT_TIMEOUT),
            sessions: SessionStore::new(DEFAULT_MAX_SESSIONS),
        }
    }

    /// Build every upstream client from configuration.
    ///
    /// Missing optional keys leave the matching feature disabled.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.upstream_timeout;

        let general = Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            timeout,
        ));

        let reasoning = config.openai_api_key.as_ref().map(|key| {
            Arc::new(OpenAiClient::new(
                key.clone(),
                config.openai_model.clone(),
                timeout,
            )) as Arc<dyn CompletionProvider>
        });

        let places = config
            .google_places_api_key
            .as_ref()
            .map(|key| PlacesClient::new(key.clone(), timeout));

        Self::new(general)
            .with_reasoning(reasoning)
            .with_places(places)
            .with_location(LocationClient::new(config.ipinfo_api_key.clone(), timeout))
            .with_sessions(SessionStore::new(config.max_sessions))
    }

    pub fn with_reasoning(mut self, reasoning: Option<Arc<dyn CompletionProvider>>) -> Self {
        self.reasoning = reasoning;
        self
    }

    pub fn with_places(mut self, places: Option<PlacesClient>) -> Self {
        self.places = places;
        self
    }

    pub fn with_location(mut self, location: LocationClient) -> Self {
        self.location = location;
        self
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }
}
