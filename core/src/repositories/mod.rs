pub mod credential;
pub mod revocation;

pub use credential::{CasOutcome, CredentialStore, InMemoryCredentialStore};
pub use revocation::{InMemoryRevocationLedger, RevocationLedger};
