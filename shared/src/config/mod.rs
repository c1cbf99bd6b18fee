//! Configuration module
//!
//! - `auth` - Token secrets, lifetimes and envelope key settings
//! - `cache` - Redis connection settings
//! - `database` - MySQL connection settings
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigResult;

// Re-export commonly used types
pub use auth::{AuthConfig, EnvelopeConfig, JwtConfig, KeyDerivationKind};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Token configuration
    pub auth: AuthConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment
    ///
    /// Fails if any secret is missing; callers should treat the error as fatal.
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Ok(Self {
            environment,
            auth: AuthConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
        })
    }
}
