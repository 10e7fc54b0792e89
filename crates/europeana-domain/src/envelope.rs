//! Result envelopes returned by `suggest` and `search`.

use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `total` (or `totalResults`) plus the list of result items
///
/// A missing `items` key deserializes as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Number of matches reported by the service (not the page size)
    #[serde(default, alias = "totalResults")]
    pub total: Option<u64>,

    /// Result items, possibly partial entity summaries
    #[serde(default)]
    pub items: Vec<Value>,
}

impl ResultEnvelope {
    /// Number of items actually returned
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no items were returned
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items that are JSON objects, as entities
    pub fn entities(&self) -> Vec<Entity> {
        self.items
            .iter()
            .filter_map(|item| item.as_object().cloned().map(Entity::from_map))
            .collect()
    }

    /// URI of the first item, for chaining into `retrieve`
    pub fn first_id(&self) -> Option<&str> {
        self.items
            .first()
            .and_then(|item| item.get("id"))
            .and_then(Value::as_str)
    }
}
