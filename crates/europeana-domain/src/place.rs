//! Place reference resolution for agents
//!
//! `placeOfBirth` and `placeOfDeath` hold a list of references that are either
//! labels (`{"en": "Vinci"}`) or bare linked-data URIs
//! (`{"@resource": "http://dbpedia.org/resource/Vinci,_Tuscany"}`).
//!
//! # Limitations
//!
//! When the reference is a URI, the display name is derived from its last
//! path segment with underscores replaced by spaces. This is a heuristic: a
//! correct name requires the Entity API `resolve` operation (for URIs known to
//! the Entity Collection) or linked-data content negotiation (for the rest).
//! Percent-encoded segments are returned as-is.

use crate::entity::{fields, Entity};
use crate::identifier::parse_identifier;
use serde_json::Value;

/// URI prefixes that mark a reference as a link rather than a label
pub const URI_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Life event whose place is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifeEvent {
    /// `placeOfBirth`
    Birth,
    /// `placeOfDeath`
    Death,
}

impl LifeEvent {
    /// Entity field holding the place references
    pub fn field(&self) -> &'static str {
        match self {
            LifeEvent::Birth => fields::PLACE_OF_BIRTH,
            LifeEvent::Death => fields::PLACE_OF_DEATH,
        }
    }

    /// Parse `birth` / `death`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "birth" => Some(LifeEvent::Birth),
            "death" => Some(LifeEvent::Death),
            _ => None,
        }
    }
}

/// Place name for a life event of an agent.
///
/// Takes the first reference of the field and its first value. `None` when
/// the field is missing, empty, or holds no usable text.
pub fn resolve_place(entity: &Entity, event: LifeEvent) -> Option<String> {
    let first_reference = match entity.get(event.field())? {
        Value::Array(references) => references.first()?,
        single => single,
    };

    let value = first_value(first_reference)?;
    if value.trim().is_empty() {
        return None;
    }

    if is_uri(value) {
        Some(display_name_from_uri(value))
    } else {
        Some(value.to_string())
    }
}

/// True if `value` starts with one of [`URI_SCHEMES`]
pub fn is_uri(value: &str) -> bool {
    URI_SCHEMES.iter().any(|scheme| value.starts_with(scheme))
}

/// Last path segment of a URI with underscores turned into spaces
pub fn display_name_from_uri(uri: &str) -> String {
    parse_identifier(uri).replace('_', " ")
}

fn first_value(reference: &Value) -> Option<&str> {
    match reference {
        Value::String(text) => Some(text.as_str()),
        Value::Object(map) => map.values().next().and_then(first_value),
        Value::Array(items) => items.first().and_then(first_value),
        _ => None,
    }
}
