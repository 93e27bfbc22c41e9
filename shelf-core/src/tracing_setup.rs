//! Tracing initialization for shelf consumers.
//!
//! Usage:
//!   RUST_LOG=shelf_store=debug  # Fine-grained log control
//!
//! Embedding processes (the HTTP layer, test harnesses) call this once at
//! startup; calling it again is an error from the subscriber registry,
//! surfaced as a config error.

use tracing_subscriber::EnvFilter;

use crate::error::{Result, ShelfError};

/// Initialize console tracing.
///
/// `debug` sets the default filter to `debug` unless `RUST_LOG` is
/// explicitly set.
pub fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| ShelfError::config(err.to_string()))
}
