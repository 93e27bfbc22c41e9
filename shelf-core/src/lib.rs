//! shelf-core: shared plumbing for the shelf record store.
//!
//! Holds the pieces every consumer needs regardless of storage backend:
//! structured errors, environment-selected configuration, the identifier
//! generator, and tracing initialization.

pub mod config;
pub mod error;
pub mod ids;
pub mod tracing_setup;

pub use config::{DatabaseConfig, Environment, ShelfConfig};
pub use error::{Result, ShelfError};
pub use ids::next_id;
pub use tracing_setup::init_tracing;
