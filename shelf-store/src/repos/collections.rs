//! Collection repository
//!
//! Collections are created fully-formed in memory and inserted as-is, so
//! the caller gets back the exact value that was written without a
//! re-read. `get` attaches items with a second query.

use chrono::Utc;
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqlitePool};

use shelf_core::ids;

use crate::error::StoreResult;
use crate::models::{empty_schema, Collection, CollectionUpdate, CollectionWithItems};
use crate::repos::ItemRepo;

/// Collection repository
pub struct CollectionRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CollectionRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a collection. A missing schema defaults to `{}`.
    pub async fn create(
        &self,
        name: &str,
        schema: Option<JsonValue>,
    ) -> StoreResult<Collection> {
        let now = Utc::now();
        let collection = Collection {
            id: ids::next_id(),
            name: name.to_owned(),
            schema: schema.unwrap_or_else(empty_schema),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO collections (id, name, schema, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&collection.id)
        .bind(&collection.name)
        .bind(Json(&collection.schema))
        .bind(collection.created_at)
        .bind(collection.updated_at)
        .execute(self.pool)
        .await?;

        Ok(collection)
    }

    /// List all collections in creation order. No filtering, no pagination.
    pub async fn list(&self) -> StoreResult<Vec<Collection>> {
        let rows = sqlx::query(
            "SELECT id, name, schema, created_at, updated_at FROM collections \
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(collection_from_row).collect()
    }

    /// Get a collection with all of its items attached.
    ///
    /// Two sequential queries, not a join: a concurrent delete between
    /// them reads as `None`, never as a half-populated result.
    pub async fn get(&self, id: &str) -> StoreResult<Option<CollectionWithItems>> {
        let row = sqlx::query(
            "SELECT id, name, schema, created_at, updated_at FROM collections WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let collection = collection_from_row(&row)?;
        let items = ItemRepo::new(self.pool).list_for_collection(id).await?;

        Ok(Some(CollectionWithItems { collection, items }))
    }

    /// Apply a partial update and return the refreshed collection.
    ///
    /// Supplied fields replace their column, absent fields keep the prior
    /// value, and `updated_at` is always stamped. The write is
    /// unconditional: an absent id updates zero rows and the follow-up
    /// read returns `None`.
    pub async fn update(
        &self,
        id: &str,
        changes: CollectionUpdate,
    ) -> StoreResult<Option<CollectionWithItems>> {
        sqlx::query(
            "UPDATE collections SET \
                 name = COALESCE(?, name), \
                 schema = COALESCE(?, schema), \
                 updated_at = ? \
             WHERE id = ?",
        )
        .bind(changes.name.as_deref())
        .bind(changes.schema.as_ref().map(Json))
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool)
        .await?;

        self.get(id).await
    }

    /// Delete a collection. Items and webhooks are left in place.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM collections WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) fn collection_from_row(row: &SqliteRow) -> StoreResult<Collection> {
    let Json(schema): Json<JsonValue> = row.try_get("schema")?;
    Ok(Collection {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        schema,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
