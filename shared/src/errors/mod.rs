//! Configuration error types
//!
//! Every variant here is fatal at startup: the process should refuse to run
//! rather than fall back to a default secret or TTL.

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    Missing { key: String },

    #[error("Configuration value must not be empty: {key}")]
    Empty { key: String },

    #[error("Access and refresh secrets must differ")]
    SharedSecret,

    #[error("Invalid duration for {key}: {value}")]
    InvalidDuration { key: String, value: String },

    #[error("Duration for {key} exceeds the maximum of {max} seconds: {value}")]
    DurationOutOfRange { key: String, value: u64, max: u64 },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn empty(key: impl Into<String>) -> Self {
        Self::Empty { key: key.into() }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
