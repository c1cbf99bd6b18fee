//! Token issuance: claims are encrypted into an envelope, then signed.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::domain::entities::claims::{Claims, Principal};
use crate::domain::entities::token::TokenKind;
use crate::errors::{DomainError, DomainResult};
use crate::services::codec::ClaimCodec;

use super::config::TokenConfig;

/// JWS payload: the encrypted envelope plus the timestamps checked before
/// decryption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SignedPayload {
    pub encrypted: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Mints access and refresh tokens
pub struct TokenIssuer {
    config: TokenConfig,
    codec: ClaimCodec,
    access_key: EncodingKey,
    refresh_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig, codec: ClaimCodec) -> Self {
        let access_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());

        Self {
            config,
            codec,
            access_key,
            refresh_key,
        }
    }

    /// Issue an access token carrying the full principal
    pub fn issue_access(&self, principal: &Principal) -> DomainResult<IssuedToken> {
        self.issue(TokenKind::Access, principal)
    }

    /// Issue a refresh token carrying only the subject
    pub fn issue_refresh(&self, principal: &Principal) -> DomainResult<IssuedToken> {
        self.issue(TokenKind::Refresh, &principal.subject_only())
    }

    /// Lifetime of a token kind in seconds
    pub fn expires_in(&self, kind: TokenKind) -> i64 {
        self.config.ttl(kind).num_seconds()
    }

    fn issue(&self, kind: TokenKind, principal: &Principal) -> DomainResult<IssuedToken> {
        let claims = Claims::new(principal, self.config.ttl(kind), self.config.clock_skew).ok_or_else(|| {
            DomainError::Internal {
                message: format!("{} token lifetime is out of range", kind),
            }
        })?;

        let payload = SignedPayload {
            encrypted: self.codec.encrypt_to_string(&claims)?,
            iat: claims.iat,
            exp: claims.exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &payload, self.key(kind)).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to sign {} token: {}", kind, e),
            }
        })?;

        Ok(IssuedToken { token, claims })
    }

    fn key(&self, kind: TokenKind) -> &EncodingKey {
        match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        }
    }
}
