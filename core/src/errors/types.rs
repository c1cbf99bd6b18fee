//! Error kinds for token lifecycle operations
//!
//! `TokenError` values are expected, locally classified outcomes that callers
//! branch on. `StoreError` is the infrastructure fault class and is surfaced
//! unchanged; retry policy belongs to the caller. `EnvelopeError` never leaves
//! the token layer: at the coordinator boundary it collapses into
//! `TokenError::InvalidToken` or `TokenError::InvalidRefreshToken`.

use thiserror::Error;

/// Token lifecycle outcomes with stable kinds
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Token has already been used")]
    TokenReused,

    #[error("No refresh token found for the user")]
    NoRefreshTokenFound,
}

impl TokenError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::TokenReused => "TOKEN_REUSED",
            TokenError::NoRefreshTokenFound => "NO_REFRESH_TOKEN_FOUND",
        }
    }

    /// Whether this outcome indicates a stolen token or a rotation race
    pub fn is_security_event(&self) -> bool {
        matches!(self, TokenError::TokenReused)
    }
}

/// Claim envelope encoding/decoding failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("Malformed envelope")]
    Malformed,

    #[error("Invalid hex in envelope {field}")]
    InvalidHex { field: &'static str },

    #[error("Invalid IV length: expected {expected}, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    #[error("Envelope encryption failed")]
    Encryption,

    #[error("Envelope decryption failed")]
    Decryption,

    #[error("Claims serialization failed: {message}")]
    Serialization { message: String },

    #[error("Invalid claims: {message}")]
    InvalidClaims { message: String },
}

/// Backing store faults
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store operation timed out: {operation}")]
    Timeout { operation: String },

    #[error("Corrupt store data: {message}")]
    Corrupt { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
