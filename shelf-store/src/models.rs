//! Entity models for the collection store.
//!
//! Every value returned by a repository is owned by the caller; mutating
//! one never touches persisted state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A named, schema-tagged container of items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    /// Caller-supplied mapping; defaults to `{}` at creation.
    pub schema: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A collection together with all of its items, as returned by
/// [`CollectionRepo::get`](crate::repos::CollectionRepo::get).
#[derive(Debug, Clone, Serialize)]
pub struct CollectionWithItems {
    #[serde(flatten)]
    pub collection: Collection,
    pub items: Vec<Item>,
}

/// Partial update for a collection; absent fields keep their prior value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionUpdate {
    pub name: Option<String>,
    pub schema: Option<JsonValue>,
}

/// An opaque data record belonging to exactly one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Not enforced against `collections`; an item can outlive its
    /// collection.
    pub collection_id: String,
    pub data: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A URL subscribed to a set of named events for a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    pub collection_id: String,
    pub url: String,
    /// Ordered event names. A row whose stored encoding is malformed
    /// lists as empty rather than failing the read.
    pub events: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The default schema for collections created without one.
pub fn empty_schema() -> JsonValue {
    JsonValue::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_with_items_serializes_flat() {
        let now = Utc::now();
        let detail = CollectionWithItems {
            collection: Collection {
                id: "1".into(),
                name: "specimens".into(),
                schema: empty_schema(),
                created_at: now,
                updated_at: now,
            },
            items: vec![],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "specimens");
        assert_eq!(json["schema"], serde_json::json!({}));
        assert!(json["items"].as_array().unwrap().is_empty());
        // No nested "collection" wrapper on the wire
        assert!(json.get("collection").is_none());
    }
}
