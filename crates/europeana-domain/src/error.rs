//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised while reading fields out of an entity response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A requested key is absent from the response
    #[error("Field '{field}' not present for this entity")]
    FieldNotPresent {
        /// Name of the missing field
        field: String,
    },

    /// A multilingual field exists but has no value in the requested language
    #[error("Field '{field}' has no value in language '{language}'")]
    LanguageNotPresent {
        /// Name of the multilingual field
        field: String,
        /// Requested language code
        language: String,
    },

    /// A field is present but its JSON shape is not the one expected
    #[error("Field '{field}' has an unexpected shape (expected {expected})")]
    UnexpectedShape {
        /// Name of the field
        field: String,
        /// Human readable description of the expected shape
        expected: &'static str,
    },

    /// The identifier segment of a URI could not be parsed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Entity type name not one of agent, place, concept, timespan
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    /// Any of the above, tagged with the entity it was raised for
    #[error("{entity}: {source}")]
    InEntity {
        /// URI or identifier of the entity
        entity: String,
        /// Underlying error
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::FieldNotPresent`]
    pub fn missing(field: impl Into<String>) -> Self {
        DomainError::FieldNotPresent {
            field: field.into(),
        }
    }

    /// Attach the entity the error was raised for
    pub fn for_entity(self, entity: impl Into<String>) -> Self {
        DomainError::InEntity {
            entity: entity.into(),
            source: Box::new(self),
        }
    }

    /// The error without entity context
    pub fn root(&self) -> &DomainError {
        match self {
            DomainError::InEntity { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_context_message() {
        let err = DomainError::missing("biographicalInformation")
            .for_entity("http://data.europeana.eu/agent/base/146741");
        assert_eq!(
            err.to_string(),
            "http://data.europeana.eu/agent/base/146741: Field 'biographicalInformation' not present for this entity"
        );
        assert_eq!(err.root(), &DomainError::missing("biographicalInformation"));
    }
}
