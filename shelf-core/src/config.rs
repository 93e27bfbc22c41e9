//! Environment-selected configuration for the shelf store.
//!
//! Database settings live in a TOML file keyed by deployment-environment
//! name ("development", "test", "production"). The active environment is
//! chosen once per process from `SHELF_ENV`. Values may reference process
//! environment variables as `${VAR}`, so a production URL can stay out of
//! the file itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShelfError};

/// Environment variable that selects the active deployment environment.
pub const ENV_VAR: &str = "SHELF_ENV";

/// Environment variable that overrides the config file location.
pub const CONFIG_VAR: &str = "SHELF_CONFIG";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// A named deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Read the active environment from `SHELF_ENV`, defaulting to
    /// development when unset or empty.
    pub fn from_env() -> Result<Self> {
        match env::var(ENV_VAR) {
            Ok(name) if !name.is_empty() => Self::parse(&name),
            _ => Ok(Self::Development),
        }
    }

    /// Parse an environment name.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            other => Err(ShelfError::unknown_environment(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Connection settings for one environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL, e.g. `sqlite://shelf-dev.db` or `sqlite::memory:`
    pub url: String,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pool connection before failing the operation
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_acquire_timeout() -> u64 {
    DEFAULT_ACQUIRE_TIMEOUT_SECS
}

/// Centralized configuration, one [`DatabaseConfig`] per environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub environments: HashMap<String, DatabaseConfig>,
}

impl ShelfConfig {
    /// Load config from the default location.
    ///
    /// A local `.env` file is applied first. A missing config file is not
    /// an error: the built-in defaults cover every known environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::defaults())
        }
    }

    /// Load config from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ShelfError::invalid_config(path, e.to_string()))?;
        Ok(config)
    }

    /// Get config file path: `$SHELF_CONFIG` or `~/.shelf/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_VAR) {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".shelf/config.toml")
    }

    /// Built-in settings used when no config file exists.
    pub fn defaults() -> Self {
        let mut environments = HashMap::new();
        environments.insert(
            "development".to_string(),
            DatabaseConfig {
                url: "sqlite://shelf-dev.db".to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            },
        );
        environments.insert(
            "test".to_string(),
            DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            },
        );
        environments.insert(
            "production".to_string(),
            DatabaseConfig {
                url: "${DATABASE_URL}".to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            },
        );
        Self { environments }
    }

    /// Settings for the given environment, with `${VAR}` references
    /// expanded from the process environment.
    pub fn database(&self, environment: Environment) -> Result<DatabaseConfig> {
        let mut config = self
            .environments
            .get(environment.as_str())
            .cloned()
            .ok_or_else(|| ShelfError::unknown_environment(environment.as_str()))?;

        config.url = expand_string(&config.url);

        if config.url.is_empty() {
            return Err(ShelfError::config(format!(
                "database url for '{}' is empty after expansion",
                environment.as_str()
            )));
        }

        Ok(config)
    }
}

/// Expand `${VAR}` references from the process environment.
///
/// Unset variables expand to the empty string, matching shell behavior.
fn expand_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        match rest[start + 2..].find('}') {
            Some(end) => {
                let name = &rest[start + 2..start + 2 + end];
                result.push_str(&env::var(name).unwrap_or_default());
                rest = &rest[start + 2 + end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
