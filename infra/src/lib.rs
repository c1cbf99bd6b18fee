//! # Infrastructure Layer
//!
//! Concrete storage for the Sessionward token lifecycle. The core crate
//! defines the [`RevocationLedger`](sw_core::RevocationLedger) and
//! [`CredentialStore`](sw_core::CredentialStore) traits; this crate provides
//! Redis and MySQL implementations of both.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL stores (default)
//! - `redis-cache`: Enable Redis stores (default)

use sw_core::errors::StoreError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and stores
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration for the storage backends

    use serde::{Deserialize, Serialize};

    // Re-export shared configs
    pub use sw_shared::config::{cache::CacheConfig, database::DatabaseConfig};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// Database configuration
        pub database: DatabaseConfig,
        /// Redis configuration
        pub cache: CacheConfig,
    }

    impl InfrastructureConfig {
        /// Load from environment, reading `.env` first if present
        pub fn from_env() -> sw_shared::ConfigResult<Self> {
            dotenvy::dotenv().ok();

            Ok(Self {
                database: DatabaseConfig::from_env()?,
                cache: CacheConfig::from_env()?,
            })
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored data could not be interpreted
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Corrupt(message) => StoreError::Corrupt { message },
            other => StoreError::Unavailable {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_maps_to_unavailable() {
        let error: StoreError = InfrastructureError::Config("bad url".to_string()).into();
        assert_eq!(
            error,
            StoreError::Unavailable {
                message: "Configuration error: bad url".to_string()
            }
        );
    }

    #[test]
    fn test_corrupt_data_keeps_its_class() {
        let error: StoreError = InfrastructureError::Corrupt("unknown token kind".to_string()).into();
        assert!(matches!(error, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_redis_error_maps_to_unavailable() {
        let redis_error = redis::RedisError::from((redis::ErrorKind::IoError, "connection reset"));
        let error: StoreError = InfrastructureError::Cache(redis_error).into();
        assert!(matches!(error, StoreError::Unavailable { .. }));
    }
}
