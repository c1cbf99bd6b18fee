//! Salted one-way fingerprint of a raw refresh token.
//!
//! Stored form: `<saltHex>$<sha256Hex>` with the digest computed over
//! `salt || token`.

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 16;

const SEPARATOR: char = '$';

/// Fingerprint of a refresh token as kept by the credential store
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint `raw_token` under a fresh random salt
    pub fn compute(raw_token: &str) -> Self {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);
        Self::with_salt(&salt, raw_token)
    }

    fn with_salt(salt: &[u8], raw_token: &str) -> Self {
        Self(format!("{}{}{}", hex::encode(salt), SEPARATOR, digest(salt, raw_token)))
    }

    /// Wrap a value previously produced by [`Fingerprint::compute`]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Constant-time check of `raw_token` against this fingerprint
    ///
    /// A stored value that cannot be parsed never matches.
    pub fn matches(&self, raw_token: &str) -> bool {
        let Some((salt_hex, _)) = self.0.split_once(SEPARATOR) else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };

        let candidate = Self::with_salt(&salt, raw_token);
        candidate.0.as_bytes().ct_eq(self.0.as_bytes()).into()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Fingerprint(..)")
    }
}

fn digest(salt: &[u8], raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(raw_token.as_bytes());
    hex::encode(hasher.finalize())
}
