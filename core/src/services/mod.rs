//! Business services containing the token lifecycle logic.

pub mod audit;
pub mod codec;
pub mod rotation;
pub mod token;

// Re-export commonly used types
pub use audit::{AuditSink, MemoryAuditSink, ReuseReason, SecurityEvent, TracingAuditSink};
pub use codec::{ClaimCodec, KeyDerivation, PaddedPassphrase, Sha256Passphrase};
pub use rotation::{PrincipalResolver, RotationConfig, RotationCoordinator};
pub use token::{IssuedToken, TokenConfig, TokenIssuer, TokenVerifier};
