//! Domain entities representing core token lifecycle objects.

pub mod claims;
pub mod token;


// Re-export commonly used types
pub use claims::{Claims, Principal, Role};
pub use token::{CredentialRecord, RevocationRecord, TokenKind, TokenPair};
