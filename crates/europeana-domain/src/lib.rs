//! Europeana Domain Layer
//!
//! Data model and data-shaping helpers for responses of the Europeana Entity
//! and Search APIs. Nothing in this crate touches the network: responses come
//! in as parsed JSON and leave as typed accessors or flat tables.
//!
//! ## Key Concepts
//!
//! - **Entity**: a cataloged agent, place, concept or time span, keyed by URI
//! - **Multilingual field**: language code mapped to one or more values
//! - **Result envelope**: `total` plus a list of `items`
//! - **Table**: the dotted-column flattening of a result envelope
//!
//! ## Example
//!
//! ```
//! use europeana_domain::{parse_identifier, resolve_place, Entity, LifeEvent};
//!
//! assert_eq!(parse_identifier("http://data.europeana.eu/agent/base/146741"), "146741");
//!
//! let entity: Entity = serde_json::from_str(
//!     r#"{"placeOfBirth": [{"@resource": "http://data.europeana.eu/place/base/Paris_France"}]}"#,
//! ).unwrap();
//! assert_eq!(resolve_place(&entity, LifeEvent::Birth).as_deref(), Some("Paris France"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod entity_type;
pub mod envelope;
pub mod error;
pub mod identifier;
pub mod multilingual;
pub mod place;
pub mod query;
pub mod table;
pub mod traits;

// Re-exports for convenience
pub use entity::{Coordinates, Entity};
pub use entity_type::EntityType;
pub use envelope::ResultEnvelope;
pub use error::DomainError;
pub use identifier::{numeric_identifier, parse_identifier, EntityRef};
pub use multilingual::{LanguageValue, LocalizedValue, MultilingualField, ValuePolicy};
pub use place::{resolve_place, LifeEvent};
pub use query::SearchQuery;
pub use table::Table;
pub use traits::EntityApi;
