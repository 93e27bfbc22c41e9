/// Structured error types for the shelf workspace.
///
/// Uses `thiserror` for better API surface and error composition.
/// Test code can still use `anyhow` for convenience, but library
/// consumers get structured, composable errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for shelf-core operations
#[derive(Error, Debug)]
pub enum ShelfError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Config file exists but could not be parsed
    #[error("Invalid config file {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    /// Deployment environment name not present in the config
    #[error("Unknown environment '{name}'")]
    UnknownEnvironment { name: String },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for shelf-core operations
pub type Result<T> = std::result::Result<T, ShelfError>;

impl ShelfError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown environment error
    pub fn unknown_environment(name: impl Into<String>) -> Self {
        Self::UnknownEnvironment { name: name.into() }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShelfError::unknown_environment("staging");
        assert_eq!(err.to_string(), "Unknown environment 'staging'");

        let err = ShelfError::invalid_config("/tmp/shelf.toml", "expected a table");
        assert!(err.to_string().contains("Invalid config"));
        assert!(err.to_string().contains("/tmp/shelf.toml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let shelf_err: ShelfError = io_err.into();

        assert!(matches!(shelf_err, ShelfError::Io { .. }));
    }
}
