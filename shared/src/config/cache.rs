//! Redis configuration module

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};
use crate::utils::duration::parse_duration;

/// Redis connection configuration for the revocation ledger and credential store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds
    pub response_timeout: u64,

    /// Optional prefix prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Maximum number of retry attempts when connecting
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 5,
            key_prefix: None,
            max_retries: default_max_retries(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seconds_or = |key: &str, default: u64| -> ConfigResult<u64> {
            match lookup(key) {
                Some(value) => parse_duration(&value)
                    .map(|d| d.as_secs())
                    .ok_or_else(|| ConfigError::InvalidDuration {
                        key: key.to_string(),
                        value,
                    }),
                None => Ok(default),
            }
        };

        Ok(Self {
            connection_timeout: seconds_or("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout)?,
            response_timeout: seconds_or("REDIS_RESPONSE_TIMEOUT", defaults.response_timeout)?,
            key_prefix: lookup("REDIS_KEY_PREFIX").filter(|p| !p.is_empty()),
            url: lookup("REDIS_URL").unwrap_or(defaults.url),
            max_retries: defaults.max_retries,
        })
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set connection and response timeouts in seconds; zero disables a limit
    pub fn with_timeouts(mut self, connection_timeout: u64, response_timeout: u64) -> Self {
        self.connection_timeout = connection_timeout;
        self.response_timeout = response_timeout;
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}
