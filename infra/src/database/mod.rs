//! Database module - MySQL implementations using SQLx
//!
//! Connection pool management, migrations, and MySQL implementations of the
//! revocation ledger and credential store.

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlCredentialStore, MySqlRevocationLedger};
