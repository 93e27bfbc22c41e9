//! Schema migrations for the collection store
//!
//! Statements are idempotent (`CREATE TABLE IF NOT EXISTS`), so re-running
//! against an already-migrated database is a no-op.
//!
//! Foreign keys are deliberately not declared: deleting a collection leaves
//! its items and webhooks in place, and `items.id` carries no uniqueness
//! constraint because rows minted by other processes may collide.

use sqlx::SqlitePool;

use crate::error::StoreResult;

/// Outcome of a best-effort migration run.
///
/// Startup never aborts on a failed migration, but the failure stays
/// distinguishable from success instead of vanishing into a catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationStatus {
    Applied,
    Failed { message: String },
}

impl MigrationStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Run all migrations.
pub async fn run(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS collections (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            schema TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id TEXT NOT NULL,
            collection_id TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS webhooks (
            id TEXT PRIMARY KEY,
            collection_id TEXT NOT NULL,
            url TEXT NOT NULL,
            events TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_id ON items(id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_collection ON items(collection_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_webhooks_collection ON webhooks(collection_id)")
        .execute(pool)
        .await?;

    tracing::info!("storage migrations complete");
    Ok(())
}
