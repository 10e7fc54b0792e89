//! Entity type module - the four kinds of entities in the Entity Collection

use crate::error::DomainError;
use std::fmt;

/// Host of the Entity Collection URIs
pub const ENTITY_URI_HOST: &str = "data.europeana.eu";

/// Kind of entity cataloged by the Entity API
///
/// - Agent: people and organizations
/// - Place: geographic locations
/// - Concept: abstract subjects and genres
/// - Timespan: centuries and periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// Person or organization
    Agent,

    /// Geographic location
    Place,

    /// Abstract concept (e.g. "Painting")
    Concept,

    /// Time span (e.g. "16th century")
    Timespan,
}

impl EntityType {
    /// All entity types, in API documentation order
    pub const ALL: [EntityType; 4] = [
        EntityType::Agent,
        EntityType::Place,
        EntityType::Concept,
        EntityType::Timespan,
    ];

    /// Get the type name as used in request parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Agent => "agent",
            EntityType::Place => "place",
            EntityType::Concept => "concept",
            EntityType::Timespan => "timespan",
        }
    }

    /// Parse a type from a string, case-insensitively
    ///
    /// Accepts both request names (`timespan`) and response `type` values
    /// (`TimeSpan`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "agent" => Some(EntityType::Agent),
            "place" => Some(EntityType::Place),
            "concept" => Some(EntityType::Concept),
            "timespan" => Some(EntityType::Timespan),
            _ => None,
        }
    }

    /// Infer the type from an Entity Collection URI
    ///
    /// `http://data.europeana.eu/agent/base/146741` is an agent. URIs from
    /// other hosts (dbpedia, wikidata, ...) yield `None`.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let rest = uri
            .strip_prefix("http://")
            .or_else(|| uri.strip_prefix("https://"))?;
        let mut segments = rest.split('/');
        if segments.next()? != ENTITY_URI_HOST {
            return None;
        }
        segments.next().and_then(Self::parse)
    }

    /// Path of an entity below the Entity API base URL
    ///
    /// Time spans are not namespaced under `base`.
    pub fn retrieve_path(&self, identifier: &str) -> String {
        match self {
            EntityType::Timespan => format!("{}/{}.json", self.as_str(), identifier),
            _ => format!("{}/base/{}.json", self.as_str(), identifier),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownEntityType(s.to_string()))
    }
}
