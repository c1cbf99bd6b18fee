//! # Sessionward Core
//!
//! Token lifecycle for an authenticated backend: claims are encrypted into an
//! envelope and signed, refresh tokens are single-use and rotated with reuse
//! detection, and revoked token ids are kept in a ledger.
//!
//! Storage is consumed through the [`RevocationLedger`] and
//! [`CredentialStore`] traits; in-memory implementations live here and the
//! Redis and MySQL ones in `sw_infra`.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
