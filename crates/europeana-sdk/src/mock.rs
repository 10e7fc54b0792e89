//! In-memory [`EntityApi`] double
//!
//! Returns canned responses without any network calls and records every call,
//! so chained lookups can be checked for their call pattern.

use crate::error::SdkError;
use europeana_domain::{Entity, EntityApi, EntityType, ResultEnvelope, SearchQuery};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type EntityKey = (Option<EntityType>, String);

#[derive(Debug, Default)]
struct MockState {
    suggestions: HashMap<(String, EntityType), Value>,
    entities: HashMap<EntityKey, Entity>,
    resolutions: HashMap<String, Entity>,
    searches: HashMap<String, Value>,
    calls: Vec<String>,
}

/// Mock Entity API for deterministic testing
///
/// # Examples
///
/// ```
/// use europeana_sdk::{EntityApi, MockEntityApi};
/// use europeana_domain::{Entity, EntityType};
/// use serde_json::json;
///
/// let api = MockEntityApi::new();
/// api.add_entity(Entity::from_value(json!({
///     "id": "http://data.europeana.eu/agent/base/146741",
///     "prefLabel": {"en": "Leonardo da Vinci"}
/// })).unwrap());
///
/// let entity = api.retrieve(EntityType::Agent, "146741").unwrap();
/// assert_eq!(entity.pref_label().unwrap().value_in("en"), Some("Leonardo da Vinci"));
/// assert_eq!(api.call_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockEntityApi {
    state: Arc<Mutex<MockState>>,
}

impl MockEntityApi {
    /// Create an empty mock; every lookup fails with `NotFound`
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the envelope returned by `suggest(text, entity_type)`
    pub fn add_suggestion(
        &self,
        text: impl Into<String>,
        entity_type: EntityType,
        envelope: Value,
    ) {
        self.state
            .lock()
            .unwrap()
            .suggestions
            .insert((text.into(), entity_type), envelope);
    }

    /// Register an entity under its type and identifier.
    ///
    /// Entities without a recognizable type answer `retrieve` for any type.
    pub fn add_entity(&self, entity: Entity) {
        let key = (
            entity.entity_type(),
            entity.identifier().unwrap_or_default().to_string(),
        );
        self.state.lock().unwrap().entities.insert(key, entity);
    }

    /// Register the entity returned by `resolve(uri)`
    pub fn add_resolution(&self, uri: impl Into<String>, entity: Entity) {
        self.state
            .lock()
            .unwrap()
            .resolutions
            .insert(uri.into(), entity);
    }

    /// Register the envelope returned by `search` for a query string
    pub fn add_search(&self, query: impl Into<String>, envelope: Value) {
        self.state
            .lock()
            .unwrap()
            .searches
            .insert(query.into(), envelope);
    }

    /// Every call so far, e.g. `retrieve agent 146741`
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of calls so far
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Number of calls to one operation (`suggest`, `retrieve`, ...)
    pub fn calls_to(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.split(' ').next() == Some(operation))
            .count()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl EntityApi for MockEntityApi {
    type Error = SdkError;

    fn suggest(&self, text: &str, entity_type: EntityType) -> Result<ResultEnvelope, SdkError> {
        self.record(format!("suggest {} {}", entity_type, text));
        let envelope = self
            .state
            .lock()
            .unwrap()
            .suggestions
            .get(&(text.to_string(), entity_type))
            .cloned();
        match envelope {
            Some(envelope) => Ok(serde_json::from_value(envelope)?),
            None => Ok(ResultEnvelope {
                total: Some(0),
                items: Vec::new(),
            }),
        }
    }

    fn retrieve(&self, entity_type: EntityType, identifier: &str) -> Result<Entity, SdkError> {
        self.record(format!("retrieve {} {}", entity_type, identifier));
        let state = self.state.lock().unwrap();
        let entity = state
            .entities
            .get(&(Some(entity_type), identifier.to_string()))
            .or_else(|| state.entities.get(&(None, identifier.to_string())))
            .cloned();
        entity.ok_or_else(|| SdkError::NotFound(format!("{} {}", entity_type, identifier)))
    }

    fn resolve(&self, uri: &str) -> Result<Entity, SdkError> {
        self.record(format!("resolve {}", uri));
        self.state
            .lock()
            .unwrap()
            .resolutions
            .get(uri)
            .cloned()
            .ok_or_else(|| SdkError::NotFound(uri.to_string()))
    }

    fn search(&self, query: &SearchQuery) -> Result<ResultEnvelope, SdkError> {
        self.record(format!("search {}", query.query));
        let envelope = self.state.lock().unwrap().searches.get(&query.query).cloned();
        match envelope {
            Some(envelope) => Ok(serde_json::from_value(envelope)?),
            None => Ok(ResultEnvelope::default()),
        }
    }
}
