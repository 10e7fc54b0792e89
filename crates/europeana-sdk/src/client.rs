//! Europeana API client implementation.
//!
//! One blocking HTTP request per call, no retries, no caching. The API key is
//! sent as the `wskey` query parameter and never logged.

use crate::config::ClientConfig;
use crate::error::SdkError;
use europeana_domain::{
    parse_identifier, Entity, EntityApi, EntityType, ResultEnvelope, SearchQuery,
};
use reqwest::blocking::{Client, Response};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Europeana SDK client
pub struct EntityClient {
    config: ClientConfig,
    http: Client,
}

impl EntityClient {
    /// Create a client; fails without an API key
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        if config.api_key.trim().is_empty() {
            return Err(SdkError::MissingApiKey);
        }

        // Redirects are handled by `resolve`, which needs the Location header
        let http = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .user_agent(concat!("europeana-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, http })
    }

    /// Create a client for the public endpoints
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, SdkError> {
        Self::new(ClientConfig::new(api_key))
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a GET with `wskey` appended
    fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Response, SdkError> {
        debug!("GET {} {:?}", url, params);

        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.push(("wskey", self.config.api_key.as_str()));

        Ok(self.http.get(url).query(&query).send()?)
    }

    /// Decode a successful response, or map its status to an error
    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SdkError> {
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(SdkError::from_status(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl EntityApi for EntityClient {
    type Error = SdkError;

    fn suggest(&self, text: &str, entity_type: EntityType) -> Result<ResultEnvelope, SdkError> {
        let url = format!("{}/suggest", self.config.entity_url);
        let params = [("text", text.to_string()), ("type", entity_type.to_string())];

        let envelope: ResultEnvelope = Self::decode(self.get(&url, &params)?)?;
        info!(
            "suggest '{}' ({}): {} of {:?} matches",
            text,
            entity_type,
            envelope.len(),
            envelope.total
        );
        Ok(envelope)
    }

    fn retrieve(&self, entity_type: EntityType, identifier: &str) -> Result<Entity, SdkError> {
        let url = format!(
            "{}/{}",
            self.config.entity_url,
            entity_type.retrieve_path(identifier)
        );
        Self::decode(self.get(&url, &[])?)
    }

    fn resolve(&self, uri: &str) -> Result<Entity, SdkError> {
        let url = format!("{}/resolve", self.config.entity_url);
        let response = self.get(&url, &[("uri", uri.to_string())])?;

        // The service answers with a redirect to the matching entity
        if response.status().is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| {
                    SdkError::DecodeError("Redirect without Location header".to_string())
                })?
                .to_string();
            debug!("resolve {} -> {}", uri, location);

            let (entity_type, identifier) = entity_from_location(&location).ok_or_else(|| {
                SdkError::DecodeError(format!("Unrecognized entity location: {}", location))
            })?;
            return self.retrieve(entity_type, &identifier);
        }

        Self::decode(response)
    }

    fn search(&self, query: &SearchQuery) -> Result<ResultEnvelope, SdkError> {
        let url = format!("{}/search.json", self.config.search_url);

        let mut params = vec![("query", query.query.clone())];
        if let Some(media) = query.media {
            params.push(("media", media.to_string()));
        }
        if let Some(qf) = &query.qf {
            params.push(("qf", qf.clone()));
        }

        let envelope: ResultEnvelope = Self::decode(self.get(&url, &params)?)?;
        info!("search '{}': {:?} results", query.query, envelope.total);
        Ok(envelope)
    }
}

/// Entity type and identifier named by a redirect target.
///
/// Accepts entity URIs (`http://data.europeana.eu/agent/base/146741`) as well
/// as API URLs (`https://api.europeana.eu/entity/agent/base/146741.json`).
pub fn entity_from_location(location: &str) -> Option<(EntityType, String)> {
    let path = location.split(['?', '#']).next()?;
    let path = path.trim_end_matches('/').trim_end_matches(".json");

    let entity_type = path.split('/').skip(1).find_map(EntityType::parse)?;
    let identifier = parse_identifier(path);
    if identifier.is_empty() || EntityType::parse(identifier) == Some(entity_type) {
        return None;
    }
    Some((entity_type, identifier.to_string()))
}
