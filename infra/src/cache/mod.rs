//! Cache module for Redis-backed stores
//!
//! Provides the Redis client plus Redis implementations of the revocation
//! ledger and the credential store.

pub mod credential_store;
pub mod redis_client;
pub mod revocation_ledger;


pub use credential_store::RedisCredentialStore;
pub use redis_client::RedisClient;
pub use revocation_ledger::RedisRevocationLedger;

// Re-export commonly used types
pub use sw_shared::config::cache::CacheConfig;
