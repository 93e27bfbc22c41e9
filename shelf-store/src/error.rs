//! Error types for shelf-store
//!
//! Not-found conditions are never errors here: lookups return `Option`
//! and deletes return `bool`. The variants below cover the failures that
//! do propagate.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The database cannot be reached: pool exhausted or closed, or the
    /// connection failed at the I/O layer.
    #[error("storage unavailable: {source}")]
    Unavailable { source: sqlx::Error },

    /// Any other database failure (constraint, decode, syntax).
    #[error("database error: {source}")]
    Database { source: sqlx::Error },

    /// A value could not be serialized for storage.
    #[error("encoding error for {context}: {source}")]
    Encoding {
        context: &'static str,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Core(#[from] shelf_core::ShelfError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable { source: err },
            _ => Self::Database { source: err },
        }
    }
}

impl StoreError {
    /// Whether this error means the backing database could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_classify_as_unavailable() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(err.is_unavailable());

        let err: StoreError = sqlx::Error::PoolClosed.into();
        assert!(err.is_unavailable());

        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(!err.is_unavailable());
    }
}
