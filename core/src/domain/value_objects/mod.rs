//! Value objects representing immutable domain concepts.

pub mod fingerprint;

// Re-export commonly used types
pub use fingerprint::Fingerprint;
