//! Domain-specific error types and error handling.

mod types;


pub use types::{EnvelopeError, StoreError, TokenError};

use sw_shared::ConfigError;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DomainError {
    /// The token outcome carried by this error, if any
    pub fn token_error(&self) -> Option<TokenError> {
        match self {
            DomainError::Token(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Whether this is an infrastructure fault rather than a token outcome
    pub fn is_store_fault(&self) -> bool {
        matches!(self, DomainError::Store(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
