//! Configuration management for the todo store.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Default collection endpoint
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/todos";

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// The raw value
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasklistConfig {
    /// Remote list endpoint
    pub api: ApiConfig,
    /// Log filter (trace, debug, info, warn, error or an `EnvFilter` directive)
    pub log_level: String,
}

/// Remote list endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Collection URL
    pub url: String,
    /// Records requested per fetch (`_limit` query parameter)
    pub page_limit: u32,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TasklistConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                url: DEFAULT_API_URL.to_string(),
                page_limit: 20,
                timeout_secs: 10,
            },
            log_level: "tasklist=debug,tasklist_runtime=info".to_string(),
        }
    }
}

impl TasklistConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TODOS_API_URL` | `https://jsonplaceholder.typicode.com/todos` |
    /// | `TODOS_PAGE_LIMIT` | `20` |
    /// | `TODOS_HTTP_TIMEOUT_SECS` | `10` |
    /// | `RUST_LOG` | `tasklist=debug,tasklist_runtime=info` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`TasklistConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            api: ApiConfig {
                url: lookup("TODOS_API_URL").unwrap_or(defaults.api.url),
                page_limit: parse_or(&lookup, "TODOS_PAGE_LIMIT", defaults.api.page_limit)?,
                timeout_secs: parse_or(
                    &lookup,
                    "TODOS_HTTP_TIMEOUT_SECS",
                    defaults.api.timeout_secs,
                )?,
            },
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
