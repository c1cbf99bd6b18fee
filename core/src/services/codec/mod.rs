//! Claim codec: symmetric encryption of claim sets into opaque envelopes.
//!
//! Key derivation is an implementation detail behind [`ClaimCodec`].

mod envelope;
mod key;


pub use envelope::{ClaimCodec, Envelope, IV_LENGTH};
pub use key::{derivation_for, KeyDerivation, PaddedPassphrase, Sha256Passphrase, KEY_LENGTH};
