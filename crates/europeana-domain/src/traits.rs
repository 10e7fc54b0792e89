//! Trait definitions for external interactions
//!
//! The remote Entity and Search APIs sit behind [`EntityApi`]. The HTTP
//! implementation lives in `europeana-sdk`; chained lookups are written
//! against the trait so they run unchanged against an in-memory double.

use crate::{Entity, EntityType, ResultEnvelope, SearchQuery};

/// Operations of the Europeana Entity API plus the Search API
///
/// Implemented by the infrastructure layer (europeana-sdk)
pub trait EntityApi {
    /// Error type for remote calls
    type Error;

    /// Entities of `entity_type` matching a text query
    fn suggest(&self, text: &str, entity_type: EntityType) -> Result<ResultEnvelope, Self::Error>;

    /// A single entity by type and identifier
    fn retrieve(&self, entity_type: EntityType, identifier: &str) -> Result<Entity, Self::Error>;

    /// The entity matching an external URI (dbpedia, wikidata, ...)
    fn resolve(&self, uri: &str) -> Result<Entity, Self::Error>;

    /// Cultural heritage objects matching a Search API query
    fn search(&self, query: &SearchQuery) -> Result<ResultEnvelope, Self::Error>;
}
