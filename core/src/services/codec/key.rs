//! Key derivation for the claim envelope cipher

use sha2::{Digest, Sha256};
use sw_shared::KeyDerivationKind;

/// AES-256 key length in bytes
pub const KEY_LENGTH: usize = 32;

/// Turns a configured secret into 32 bytes of key material
pub trait KeyDerivation: Send + Sync {
    fn derive(&self, secret: &str) -> [u8; KEY_LENGTH];
}

/// Right-pads the secret with `'0'` and truncates it to 32 bytes
///
/// Accepts `AES_SECRET_KEY` values in the format existing deployments already
/// configure. Entropy is bounded by the secret itself; prefer
/// [`Sha256Passphrase`] for new setups.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddedPassphrase;

impl KeyDerivation for PaddedPassphrase {
    fn derive(&self, secret: &str) -> [u8; KEY_LENGTH] {
        let mut key = [b'0'; KEY_LENGTH];
        let bytes = secret.as_bytes();
        let len = bytes.len().min(KEY_LENGTH);
        key[..len].copy_from_slice(&bytes[..len]);
        key
    }
}

/// SHA-256 digest of the secret
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Passphrase;

impl KeyDerivation for Sha256Passphrase {
    fn derive(&self, secret: &str) -> [u8; KEY_LENGTH] {
        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&Sha256::digest(secret.as_bytes()));
        key
    }
}

/// Derivation selected by configuration
pub fn derivation_for(kind: KeyDerivationKind) -> Box<dyn KeyDerivation> {
    match kind {
        KeyDerivationKind::Padded => Box::new(PaddedPassphrase),
        KeyDerivationKind::Sha256 => Box::new(Sha256Passphrase),
    }
}
