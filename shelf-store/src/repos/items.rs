//! Item repository
//!
//! Items are opaque JSON records. Updates replace `data` wholesale, and
//! both update and delete match on `(id, collection_id)` so a mismatched
//! collection reads as not-found.

use chrono::Utc;
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqlitePool};

use shelf_core::ids;

use crate::error::StoreResult;
use crate::models::Item;

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an item attached to a collection.
    ///
    /// The collection id is not checked against `collections`; the store
    /// accepts items for ids it has never seen.
    pub async fn create(&self, collection_id: &str, data: JsonValue) -> StoreResult<Item> {
        let now = Utc::now();
        let item = Item {
            id: ids::next_id(),
            collection_id: collection_id.to_owned(),
            data,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO items (id, collection_id, data, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.collection_id)
        .bind(Json(&item.data))
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(self.pool)
        .await?;

        Ok(item)
    }

    /// All items of a collection, creation order.
    pub async fn list_for_collection(&self, collection_id: &str) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query(
            "SELECT id, collection_id, data, created_at, updated_at FROM items \
             WHERE collection_id = ? \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(collection_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(item_from_row).collect()
    }

    /// Replace an item's data and return the stored row.
    ///
    /// The write matches on `(id, collection_id)`, but the returned row is
    /// re-fetched by item id alone. When two collections carry items with
    /// the same id, the fetch can surface the sibling row instead of the
    /// update target. Carried forward unchanged; the hazard is pinned by a
    /// test rather than silently repaired here.
    pub async fn update(
        &self,
        collection_id: &str,
        item_id: &str,
        data: JsonValue,
    ) -> StoreResult<Option<Item>> {
        sqlx::query(
            "UPDATE items SET data = ?, updated_at = ? \
             WHERE id = ? AND collection_id = ?",
        )
        .bind(Json(&data))
        .bind(Utc::now())
        .bind(item_id)
        .bind(collection_id)
        .execute(self.pool)
        .await?;

        let row = sqlx::query(
            "SELECT id, collection_id, data, created_at, updated_at FROM items \
             WHERE id = ? LIMIT 1",
        )
        .bind(item_id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(item_from_row).transpose()
    }

    /// Delete an item. Requires both ids to match.
    pub async fn delete(&self, collection_id: &str, item_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ? AND collection_id = ?")
            .bind(item_id)
            .bind(collection_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) fn item_from_row(row: &SqliteRow) -> StoreResult<Item> {
    let Json(data): Json<JsonValue> = row.try_get("data")?;
    Ok(Item {
        id: row.try_get("id")?,
        collection_id: row.try_get("collection_id")?,
        data,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
