//! AES-256-GCM claim envelope
//!
//! Serialized form is `<ivHex>:<cipherHex>`, where the ciphertext carries the
//! 16-byte authentication tag. A fresh IV is drawn from the OS RNG for every
//! encryption.

use aes_gcm::{
    aead::{consts::U16, Aead, KeyInit},
    aes::Aes256,
    AesGcm, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use std::str::FromStr;
use sw_shared::EnvelopeConfig;

use crate::domain::entities::claims::Claims;
use crate::errors::EnvelopeError;

use super::key::{derivation_for, KeyDerivation};

/// IV length in bytes
pub const IV_LENGTH: usize = 16;

type EnvelopeCipher = AesGcm<Aes256, U16>;

/// Encrypted claims with their IV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub iv: [u8; IV_LENGTH],
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.iv), hex::encode(&self.ciphertext))
    }
}

impl FromStr for Envelope {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (iv_hex, cipher_hex) = s.split_once(':').ok_or(EnvelopeError::Malformed)?;
        if iv_hex.is_empty() || cipher_hex.is_empty() {
            return Err(EnvelopeError::Malformed);
        }

        let iv_bytes = hex::decode(iv_hex).map_err(|_| EnvelopeError::InvalidHex { field: "iv" })?;
        let iv: [u8; IV_LENGTH] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| EnvelopeError::InvalidIvLength {
                expected: IV_LENGTH,
                actual: iv_bytes.len(),
            })?;

        let ciphertext = hex::decode(cipher_hex)
            .map_err(|_| EnvelopeError::InvalidHex { field: "ciphertext" })?;

        Ok(Self { iv, ciphertext })
    }
}

/// Encrypts and decrypts claim sets under one fixed key
#[derive(Clone)]
pub struct ClaimCodec {
    cipher: EnvelopeCipher,
}

impl ClaimCodec {
    /// Build a codec from a secret and a key derivation
    pub fn new(secret: &str, derivation: &dyn KeyDerivation) -> Self {
        let key = derivation.derive(secret);
        let cipher = EnvelopeCipher::new(Key::<EnvelopeCipher>::from_slice(&key));
        Self { cipher }
    }

    /// Build a codec from configuration
    pub fn from_config(config: &EnvelopeConfig) -> Self {
        let derivation = derivation_for(config.key_derivation);
        Self::new(&config.secret, derivation.as_ref())
    }

    pub fn encrypt(&self, claims: &Claims) -> Result<Envelope, EnvelopeError> {
        let plaintext = serde_json::to_vec(claims).map_err(|e| EnvelopeError::Serialization {
            message: e.to_string(),
        })?;

        let mut iv = [0u8; IV_LENGTH];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::<U16>::from_slice(&iv), plaintext.as_slice())
            .map_err(|_| EnvelopeError::Encryption)?;

        Ok(Envelope { iv, ciphertext })
    }

    /// Decrypt and validate; never returns partial claims
    pub fn decrypt(&self, envelope: &Envelope) -> Result<Claims, EnvelopeError> {
        let plaintext = self
            .cipher
            .decrypt(Nonce::<U16>::from_slice(&envelope.iv), envelope.ciphertext.as_slice())
            .map_err(|_| EnvelopeError::Decryption)?;

        let claims: Claims =
            serde_json::from_slice(&plaintext).map_err(|e| EnvelopeError::Serialization {
                message: e.to_string(),
            })?;
        claims.validate()?;

        Ok(claims)
    }

    pub fn encrypt_to_string(&self, claims: &Claims) -> Result<String, EnvelopeError> {
        self.encrypt(claims).map(|envelope| envelope.to_string())
    }

    pub fn decrypt_str(&self, envelope: &str) -> Result<Claims, EnvelopeError> {
        self.decrypt(&envelope.parse::<Envelope>()?)
    }
}

impl fmt::Debug for ClaimCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimCodec").finish_non_exhaustive()
    }
}
