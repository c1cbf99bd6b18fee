//! Token verification: signature and expiry first, then envelope decryption.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::collections::HashSet;

use crate::domain::entities::claims::Claims;
use crate::domain::entities::token::TokenKind;
use crate::services::codec::ClaimCodec;

use super::config::TokenConfig;
use super::issuer::SignedPayload;

/// Checks tokens minted by [`super::TokenIssuer`]
///
/// Every failure is reported as `None`. The reason is logged at `debug`
/// level without the token itself.
pub struct TokenVerifier {
    codec: ClaimCodec,
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
    inspection: Validation,
}

impl TokenVerifier {
    pub fn new(config: &TokenConfig, codec: ClaimCodec) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        let mut inspection = Validation::new(Algorithm::HS256);
        inspection.insecure_disable_signature_validation();
        inspection.validate_exp = false;
        inspection.validate_aud = false;
        inspection.required_spec_claims = HashSet::new();

        Self {
            codec,
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
            inspection,
        }
    }

    /// Verify signature, expiry and envelope for a token of `kind`
    pub fn verify(&self, token: &str, kind: TokenKind) -> Option<Claims> {
        let payload = match decode::<SignedPayload>(token, self.key(kind), &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(kind = %kind, error = %e, "Token signature check failed");
                return None;
            }
        };

        let claims = match self.codec.decrypt_str(&payload.encrypted) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(kind = %kind, error = %e, "Token envelope rejected");
                return None;
            }
        };

        if claims.exp != payload.exp || claims.iat != payload.iat {
            tracing::debug!(kind = %kind, "Token timestamps disagree with envelope");
            return None;
        }
        if claims.is_expired() {
            tracing::debug!(kind = %kind, "Token expired");
            return None;
        }

        Some(claims)
    }

    /// Decode without checking signature or expiry
    ///
    /// The result must not be used to make trust decisions.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let payload = match decode::<SignedPayload>(token, &DecodingKey::from_secret(&[]), &self.inspection) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "Token could not be decoded");
                return None;
            }
        };

        match self.codec.decrypt_str(&payload.encrypted) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Token envelope could not be decoded");
                None
            }
        }
    }

    fn key(&self, kind: TokenKind) -> &DecodingKey {
        match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        }
    }
}
