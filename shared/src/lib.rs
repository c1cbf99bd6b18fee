//! Shared utilities and common types for the Sessionward workspace
//!
//! This crate provides functionality used by both the core and the
//! infrastructure crates:
//! - Configuration types and environment loading
//! - Configuration errors
//! - Logging initialisation
//! - Duration parsing for TTL settings

pub mod config;
pub mod errors;
pub mod logging;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, EnvelopeConfig, Environment,
    JwtConfig, KeyDerivationKind, LogFormat, LoggingConfig,
};
pub use errors::{ConfigError, ConfigResult};
pub use logging::init_logging;
pub use utils::duration::parse_duration;
