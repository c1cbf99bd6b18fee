//! Database configuration module

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};
use crate::utils::duration::parse_duration;

/// Default MySQL connection URL
pub const DEFAULT_DATABASE_URL: &str = "mysql://localhost:3306/sessionward";

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_DATABASE_URL),
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    ///
    /// Unset keys take their defaults; set but unparsable values are errors.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(max) if max > 0 => max,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "DATABASE_MAX_CONNECTIONS".to_string(),
                        value,
                    })
                }
            },
            None => defaults.max_connections,
        };
        let connect_timeout = match lookup("DATABASE_CONNECT_TIMEOUT") {
            Some(value) => parse_duration(&value)
                .map(|d| d.as_secs())
                .ok_or_else(|| ConfigError::InvalidDuration {
                    key: "DATABASE_CONNECT_TIMEOUT".to_string(),
                    value,
                })?,
            None => defaults.connect_timeout,
        };

        Ok(Self {
            url: lookup("DATABASE_URL").unwrap_or(defaults.url),
            max_connections,
            connect_timeout,
            ..defaults
        })
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}
