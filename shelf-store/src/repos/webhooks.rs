//! Webhook repository
//!
//! Event lists are stored as JSON text. A row whose stored encoding has
//! gone bad decodes to an empty list instead of failing the listing, so
//! one malformed row never takes down a read.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::warn;

use shelf_core::ids;

use crate::error::{StoreError, StoreResult};
use crate::models::Webhook;

/// Webhook repository
pub struct WebhookRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WebhookRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All webhooks of a collection, creation order, events decoded.
    pub async fn list_for_collection(&self, collection_id: &str) -> StoreResult<Vec<Webhook>> {
        let rows = sqlx::query(
            "SELECT id, collection_id, url, events, created_at, updated_at FROM webhooks \
             WHERE collection_id = ? \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(collection_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(webhook_from_row).collect()
    }

    /// Subscribe a URL to a set of events.
    ///
    /// Stores the encoded event list but returns the caller's original
    /// sequence, skipping a pointless encode/decode round trip.
    pub async fn create(
        &self,
        collection_id: &str,
        url: &str,
        events: Vec<String>,
    ) -> StoreResult<Webhook> {
        let encoded = serde_json::to_string(&events).map_err(|source| StoreError::Encoding {
            context: "webhook events",
            source,
        })?;

        let now = Utc::now();
        let webhook = Webhook {
            id: ids::next_id(),
            collection_id: collection_id.to_owned(),
            url: url.to_owned(),
            events,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO webhooks (id, collection_id, url, events, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&webhook.id)
        .bind(&webhook.collection_id)
        .bind(&webhook.url)
        .bind(&encoded)
        .bind(webhook.created_at)
        .bind(webhook.updated_at)
        .execute(self.pool)
        .await?;

        Ok(webhook)
    }

    /// Delete a webhook by id alone; no collection scoping.
    pub async fn delete(&self, webhook_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM webhooks WHERE id = ?")
            .bind(webhook_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn webhook_from_row(row: &SqliteRow) -> StoreResult<Webhook> {
    let id: String = row.try_get("id")?;
    let encoded: String = row.try_get("events")?;
    let events = decode_events(&id, &encoded);

    Ok(Webhook {
        collection_id: row.try_get("collection_id")?,
        url: row.try_get("url")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        id,
        events,
    })
}

/// Decode a stored event list, substituting empty on malformed data.
fn decode_events(webhook_id: &str, encoded: &str) -> Vec<String> {
    match serde_json::from_str(encoded) {
        Ok(events) => events,
        Err(error) => {
            warn!(webhook_id, %error, "stored webhook events undecodable, substituting empty list");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_round_trips_event_list() {
        let events = decode_events("w1", r#"["create","delete"]"#);
        assert_eq!(events, vec!["create".to_string(), "delete".to_string()]);
    }

    #[test]
    fn decode_substitutes_empty_on_garbage() {
        assert!(decode_events("w1", "not json at all").is_empty());
        assert!(decode_events("w1", "").is_empty());
        // Valid JSON of the wrong shape is malformed too
        assert!(decode_events("w1", r#"{"create":true}"#).is_empty());
    }
}
