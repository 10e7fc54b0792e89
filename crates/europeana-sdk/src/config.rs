//! Client configuration.

use std::time::Duration;

/// Default Entity API endpoint
pub const DEFAULT_ENTITY_URL: &str = "https://api.europeana.eu/entity";

/// Default Search API endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://api.europeana.eu/record/v2";

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable read by the CLI for the API key
pub const API_KEY_ENV: &str = "EUROPEANA_API_KEY";

/// Endpoints, key and timeout of an [`EntityClient`](crate::EntityClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent as `wskey`
    pub api_key: String,
    /// Entity API base URL, without trailing slash
    pub entity_url: String,
    /// Search API base URL, without trailing slash
    pub search_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for the public endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            entity_url: DEFAULT_ENTITY_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the Entity API base URL
    pub fn with_entity_url(mut self, url: impl Into<String>) -> Self {
        self.entity_url = trim_base(url.into());
        self
    }

    /// Override the Search API base URL
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = trim_base(url.into());
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
