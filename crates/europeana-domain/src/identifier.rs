//! Identifier parsing for entity URIs.
//!
//! Entity identifiers are always the final path segment of the entity URI:
//! `http://data.europeana.eu/agent/base/146741` has identifier `146741`.

use crate::entity_type::EntityType;
use crate::error::DomainError;

/// Return the substring after the final `/` of a URI.
///
/// No validation beyond the split: input without a separator comes back
/// unchanged, and a trailing slash yields an empty identifier.
pub fn parse_identifier(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(idx) => &uri[idx + 1..],
        None => uri,
    }
}

/// Parse the identifier of a URI as an integer.
pub fn numeric_identifier(uri: &str) -> Result<u64, DomainError> {
    let identifier = parse_identifier(uri);
    identifier
        .parse()
        .map_err(|_| DomainError::InvalidIdentifier(identifier.to_string()))
}

/// Identifier plus the entity type inferred from its URI, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    /// Type named in the URI path (`None` for foreign URIs or bare ids)
    pub entity_type: Option<EntityType>,
    /// Final path segment
    pub identifier: String,
}

impl EntityRef {
    /// Split a URI into type and identifier
    pub fn from_uri(uri: &str) -> Self {
        Self {
            entity_type: EntityType::from_uri(uri),
            identifier: parse_identifier(uri).to_string(),
        }
    }

    /// Resolve the type, preferring the one found in the URI
    pub fn type_or(&self, fallback: EntityType) -> EntityType {
        self.entity_type.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_agent_uri() {
        assert_eq!(
            parse_identifier("http://data.europeana.eu/agent/base/146741"),
            "146741"
        );
    }

    #[test]
    fn test_parse_without_separator() {
        assert_eq!(parse_identifier("146741"), "146741");
        assert_eq!(parse_identifier(""), "");
    }

    #[test]
    fn test_parse_trailing_slash() {
        assert_eq!(parse_identifier("http://data.europeana.eu/place/base/"), "");
    }

    #[test]
    fn test_numeric_identifier() {
        assert_eq!(
            numeric_identifier("http://data.europeana.eu/concept/base/47").unwrap(),
            47
        );
        assert_eq!(
            numeric_identifier("http://dbpedia.org/resource/Paris"),
            Err(DomainError::InvalidIdentifier("Paris".to_string()))
        );
    }

    #[test]
    fn test_entity_ref() {
        let entity_ref = EntityRef::from_uri("http://data.europeana.eu/place/base/41488");
        assert_eq!(entity_ref.entity_type, Some(EntityType::Place));
        assert_eq!(entity_ref.identifier, "41488");

        let bare = EntityRef::from_uri("146741");
        assert_eq!(bare.entity_type, None);
        assert_eq!(bare.type_or(EntityType::Agent), EntityType::Agent);
    }
}
