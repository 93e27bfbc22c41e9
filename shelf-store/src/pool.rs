//! Database connection pool management
//!
//! One `SqlitePool` per process, built from the environment-selected
//! config. Limits and the acquire timeout are explicit: a stalled
//! database surfaces as an `Unavailable` error instead of a hang.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::debug;

use shelf_core::DatabaseConfig;

use crate::error::StoreResult;

/// Create a SQLite connection pool.
///
/// The database file is created if missing; `sqlite::memory:` is accepted
/// for throwaway databases.
pub async fn create_pool(config: &DatabaseConfig) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    debug!(url = %config.url, max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn pool_acquires_connection() {
        let pool = create_pool(&memory_config()).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn closed_pool_reports_unavailable() {
        let pool = create_pool(&memory_config()).await.expect("pool creation failed");
        pool.close().await;

        let err = sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .expect_err("query on closed pool should fail");
        let err: crate::error::StoreError = err.into();
        assert!(err.is_unavailable());
    }
}
