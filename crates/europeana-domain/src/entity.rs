//! Entity responses
//!
//! An entity response is a JSON object whose fields vary by entity type. It is
//! kept as a map (in response key order) and read through accessors that all
//! tolerate absence: optional lookups return `Option`, required lookups fail
//! with [`DomainError::FieldNotPresent`].

use crate::entity_type::EntityType;
use crate::error::DomainError;
use crate::identifier::parse_identifier;
use crate::multilingual::MultilingualField;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names used across entity types
pub mod fields {
    /// Entity URI
    pub const ID: &str = "id";
    /// Response type (`Agent`, `Place`, `Concept`, `TimeSpan`)
    pub const TYPE: &str = "type";
    /// Preferred name, multilingual
    pub const PREF_LABEL: &str = "prefLabel";
    /// Agent biography, multilingual
    pub const BIOGRAPHICAL_INFORMATION: &str = "biographicalInformation";
    /// Concept description, multilingual with list values
    pub const NOTE: &str = "note";
    /// Parent place URIs
    pub const IS_PART_OF: &str = "isPartOf";
    /// Related entity URIs
    pub const RELATED: &str = "related";
    /// Agent place of birth references
    pub const PLACE_OF_BIRTH: &str = "placeOfBirth";
    /// Agent place of death references
    pub const PLACE_OF_DEATH: &str = "placeOfDeath";
    /// Place latitude
    pub const LAT: &str = "lat";
    /// Place longitude
    pub const LONG: &str = "long";
}

/// Latitude/longitude of a place
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub long: f64,
}

/// An entity response from `retrieve`, `resolve`, or a `suggest` item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
    /// Wrap an already parsed JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Convert a JSON value, failing unless it is an object
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(DomainError::UnexpectedShape {
                field: "<entity>".to_string(),
                expected: "a JSON object",
            }),
        }
    }

    /// Underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Field names in response order
    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// True if the response carries `field`
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Raw value of `field`
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Raw value of `field`, failing with a field-not-present error
    pub fn require(&self, field: &str) -> Result<&Value, DomainError> {
        self.get(field).ok_or_else(|| DomainError::missing(field))
    }

    /// Entity URI
    pub fn id(&self) -> Option<&str> {
        self.get(fields::ID).and_then(Value::as_str)
    }

    /// Final path segment of the entity URI
    pub fn identifier(&self) -> Option<&str> {
        self.id().map(parse_identifier)
    }

    /// Entity type, from the `type` field or else from the URI
    pub fn entity_type(&self) -> Option<EntityType> {
        self.get(fields::TYPE)
            .and_then(Value::as_str)
            .and_then(EntityType::parse)
            .or_else(|| self.id().and_then(EntityType::from_uri))
    }

    /// Normalized multilingual field; missing gives `Absent`
    pub fn multilingual(&self, field: &str) -> Result<MultilingualField, DomainError> {
        MultilingualField::parse(field, self.get(field))
    }

    /// Preferred labels
    pub fn pref_label(&self) -> Result<MultilingualField, DomainError> {
        self.multilingual(fields::PREF_LABEL)
    }

    /// First value of a multilingual field in one language.
    ///
    /// Fails with [`DomainError::FieldNotPresent`] when the field is missing
    /// and [`DomainError::LanguageNotPresent`] when the language is.
    pub fn localized(&self, field: &str, language: &str) -> Result<String, DomainError> {
        let multilingual = self.multilingual(field)?;
        if multilingual.is_absent() {
            return Err(DomainError::missing(field));
        }
        multilingual
            .value_in(language)
            .map(str::to_string)
            .ok_or_else(|| DomainError::LanguageNotPresent {
                field: field.to_string(),
                language: language.to_string(),
            })
    }

    /// Biography in one language
    pub fn biography(&self, language: &str) -> Result<String, DomainError> {
        self.localized(fields::BIOGRAPHICAL_INFORMATION, language)
    }

    /// Referenced URIs of a relational field such as `isPartOf` or `related`.
    ///
    /// Entries may be bare strings or objects carrying `id`, `@id` or
    /// `@resource`. Missing fields give an empty list.
    pub fn references(&self, field: &str) -> Vec<String> {
        match self.get(field) {
            Some(Value::Array(items)) => items.iter().filter_map(reference_uri).collect(),
            Some(other) => reference_uri(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Place coordinates, when both `lat` and `long` are present
    pub fn coordinates(&self) -> Option<Coordinates> {
        let lat = self.get(fields::LAT).and_then(as_degrees)?;
        let long = self.get(fields::LONG).and_then(as_degrees)?;
        Some(Coordinates { lat, long })
    }
}

impl From<Map<String, Value>> for Entity {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn reference_uri(value: &Value) -> Option<String> {
    match value {
        Value::String(uri) => Some(uri.clone()),
        Value::Object(map) => ["id", "@id", "@resource"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

fn as_degrees(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
