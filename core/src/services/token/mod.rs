//! Token module for signed, encrypted session tokens
//!
//! This module handles:
//! - Access and refresh token issuance
//! - Signature, expiry and envelope verification
//! - Unverified inspection of token contents

mod config;
mod issuer;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::TokenConfig;
pub use issuer::{IssuedToken, TokenIssuer};
pub use verifier::TokenVerifier;
