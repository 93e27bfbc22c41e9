//! shelf-store: the collection store
//!
//! Persists named collections, their opaque items, and per-collection
//! webhook subscriptions in SQLite via sqlx. Every operation is an
//! independent async call against one shared pool; there is no in-process
//! caching, no background work, and no cross-entity transaction. The HTTP
//! layer that maps these calls to routes lives outside this crate.

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod repos;

use sqlx::SqlitePool;
use tracing::warn;

use shelf_core::{DatabaseConfig, Environment, ShelfConfig};

pub use error::{StoreError, StoreResult};
pub use migrations::MigrationStatus;
pub use models::{Collection, CollectionUpdate, CollectionWithItems, Item, Webhook};
pub use repos::{CollectionRepo, ItemRepo, WebhookRepo};

/// Handle to the collection store.
///
/// Process-scoped state is explicit rather than a module global:
/// construct once with [`Store::connect`], share by cloning, tear down
/// with [`Store::close`]. Tests build isolated stores against temporary
/// databases.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Connect using explicit database settings.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = pool::create_pool(config).await?;
        Ok(Self { pool })
    }

    /// Connect using the environment-selected configuration
    /// (`SHELF_ENV` picks the entry, `~/.shelf/config.toml` supplies it).
    pub async fn connect_from_env() -> StoreResult<Self> {
        let environment = Environment::from_env()?;
        let config = ShelfConfig::load()?;
        let database = config.database(environment)?;
        Self::connect(&database).await
    }

    /// Apply pending migrations, best-effort.
    ///
    /// Never aborts startup: a failure is assumed to mean the schema is
    /// already in place. The outcome stays distinguishable and the cause
    /// is logged rather than swallowed.
    pub async fn initialize(&self) -> MigrationStatus {
        match migrations::run(&self.pool).await {
            Ok(()) => MigrationStatus::Applied,
            Err(error) => {
                warn!(%error, "migrations failed, continuing on the assumption the schema exists");
                MigrationStatus::Failed {
                    message: error.to_string(),
                }
            }
        }
    }

    pub fn collections(&self) -> CollectionRepo<'_> {
        CollectionRepo::new(&self.pool)
    }

    pub fn items(&self) -> ItemRepo<'_> {
        ItemRepo::new(&self.pool)
    }

    pub fn webhooks(&self) -> WebhookRepo<'_> {
        WebhookRepo::new(&self.pool)
    }

    /// The underlying pool, for callers that need raw statements.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool. Operations issued afterwards fail as unavailable.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
