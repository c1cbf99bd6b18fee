//! Rotation coordinator implementation
//!
//! Refresh walks `Received -> SignatureOK -> NotRevoked -> FingerprintChecked`
//! and ends in either `Rotated` or `ReuseDetected`. No in-process locks are
//! taken: the ledger's idempotent revoke and the credential store's
//! compare-and-set are the only synchronisation points.

use std::future::Future;
use std::sync::Arc;
use chrono::Utc;
use sw_shared::AuthConfig;

use crate::domain::entities::claims::{Claims, Principal};
use crate::domain::entities::token::{RevocationRecord, TokenKind, TokenPair};
use crate::domain::value_objects::Fingerprint;
use crate::errors::{DomainError, DomainResult, StoreError, TokenError};
use crate::repositories::{CasOutcome, CredentialStore, RevocationLedger};
use crate::services::audit::{AuditSink, ReuseReason, SecurityEvent, TracingAuditSink};
use crate::services::codec::ClaimCodec;
use crate::services::token::{IssuedToken, TokenConfig, TokenIssuer, TokenVerifier};

use super::config::RotationConfig;
use super::resolver::PrincipalResolver;

/// Coordinates session issuance, refresh rotation, logout and revocation
pub struct RotationCoordinator<L, C>
where
    L: RevocationLedger,
    C: CredentialStore,
{
    /// Token minting
    issuer: TokenIssuer,
    /// Token checking
    verifier: TokenVerifier,
    /// Revoked token ids
    ledger: Arc<L>,
    /// Per-subject refresh fingerprints
    credentials: Arc<C>,
    /// Security event destination
    audit: Arc<dyn AuditSink>,
    /// Optional email/role lookup for refreshed access tokens
    principals: Option<Arc<dyn PrincipalResolver>>,
    config: RotationConfig,
}

impl<L, C> RotationCoordinator<L, C>
where
    L: RevocationLedger,
    C: CredentialStore,
{
    /// Create a coordinator that audits through `tracing`
    pub fn new(issuer: TokenIssuer, verifier: TokenVerifier, ledger: Arc<L>, credentials: Arc<C>) -> Self {
        Self {
            issuer,
            verifier,
            ledger,
            credentials,
            audit: Arc::new(TracingAuditSink),
            principals: None,
            config: RotationConfig::default(),
        }
    }

    /// Build issuer, verifier and codec from loaded configuration
    pub fn from_config(config: &AuthConfig, ledger: Arc<L>, credentials: Arc<C>) -> DomainResult<Self> {
        config.validate()?;
        let token_config = TokenConfig::from_jwt(&config.jwt)?;
        let codec = ClaimCodec::from_config(&config.envelope);

        let verifier = TokenVerifier::new(&token_config, codec.clone());
        let issuer = TokenIssuer::new(token_config, codec);

        Ok(Self::new(issuer, verifier, ledger, credentials))
    }

    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_principal_resolver(mut self, resolver: Arc<dyn PrincipalResolver>) -> Self {
        self.principals = Some(resolver);
        self
    }

    pub fn with_config(mut self, config: RotationConfig) -> Self {
        self.config = config;
        self
    }

    /// Issue a fresh session, replacing any previous one for the subject
    ///
    /// # Arguments
    ///
    /// * `principal` - Identity established by the login collaborator
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New access and refresh tokens
    /// * `Err(DomainError)` - Signing or the credential store failed
    pub async fn issue_on_login(&self, principal: &Principal) -> DomainResult<TokenPair> {
        if principal.subject.trim().is_empty() {
            return Err(DomainError::Internal {
                message: "Cannot issue a session without a subject".to_string(),
            });
        }

        let access = self.issuer.issue_access(principal)?;
        let refresh = self.issuer.issue_refresh(principal)?;
        let fingerprint = Fingerprint::compute(&refresh.token);

        self.store(
            "set_fingerprint",
            self.credentials.set_fingerprint(&principal.subject, &fingerprint),
        )
        .await?;

        self.record(SecurityEvent::SessionIssued {
            subject: principal.subject.clone(),
            refresh_jti: refresh.claims.jti.clone(),
        })
        .await;

        Ok(self.pair(access, refresh))
    }

    /// Exchange a refresh token for a new pair, invalidating it
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Rotated tokens
    /// * `Err(TokenError::InvalidRefreshToken)` - Unverifiable token or no session
    /// * `Err(TokenError::TokenRevoked)` - Token id already revoked
    /// * `Err(TokenError::TokenReused)` - Token superseded or a concurrent
    ///   refresh won
    /// * `Err(StoreError)` - A store failed or timed out
    pub async fn refresh(&self, raw_refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self
            .verifier
            .verify(raw_refresh_token, TokenKind::Refresh)
            .ok_or(TokenError::InvalidRefreshToken)?;
        let subject = claims.sub.clone();

        if self.store("is_revoked", self.ledger.is_revoked(&claims.jti)).await? {
            self.record(SecurityEvent::RevokedTokenReplay {
                subject,
                jti: claims.jti.clone(),
            })
            .await;
            return Err(TokenError::TokenRevoked.into());
        }

        let stored = self
            .store("get_fingerprint", self.credentials.get_fingerprint(&subject))
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        if !stored.matches(raw_refresh_token) {
            self.revoke(&claims, TokenKind::Refresh).await?;
            self.record(SecurityEvent::TokenReused {
                subject,
                jti: claims.jti.clone(),
                reason: ReuseReason::FingerprintMismatch,
            })
            .await;
            return Err(TokenError::TokenReused.into());
        }

        // Resolve before any write so a lookup failure leaves the session intact
        let principal = self.resolve_principal(&subject).await?;

        self.revoke(&claims, TokenKind::Refresh).await?;

        let access = self.issuer.issue_access(&principal)?;
        let refresh = self.issuer.issue_refresh(&principal)?;
        let next = Fingerprint::compute(&refresh.token);

        let outcome = self
            .store(
                "compare_and_set_fingerprint",
                self.credentials
                    .compare_and_set_fingerprint(&subject, &stored, Some(&next)),
            )
            .await?;

        if outcome == CasOutcome::Conflict {
            self.record(SecurityEvent::TokenReused {
                subject,
                jti: claims.jti.clone(),
                reason: ReuseReason::LostRace,
            })
            .await;
            return Err(TokenError::TokenReused.into());
        }

        self.record(SecurityEvent::TokenRotated {
            subject,
            old_jti: claims.jti.clone(),
            new_jti: refresh.claims.jti.clone(),
        })
        .await;

        Ok(self.pair(access, refresh))
    }

    /// End the subject's session
    ///
    /// Presented tokens are revoked when they verify and belong to `subject`.
    /// Without a refresh token the stored fingerprint is cleared outright.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Session ended, or already ended but something was revoked.
    ///   A stale refresh token alone leaves the session untouched and records
    ///   no event.
    /// * `Err(TokenError::NoRefreshTokenFound)` - No session and nothing revoked
    pub async fn logout(
        &self,
        subject: &str,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> DomainResult<()> {
        let mut revoked = 0usize;
        let mut cleared = false;

        if let Some(claims) = access_token
            .and_then(|token| self.verifier.verify(token, TokenKind::Access))
            .filter(|claims| claims.sub == subject)
        {
            self.revoke(&claims, TokenKind::Access).await?;
            revoked += 1;
        }

        let stored = self
            .store("get_fingerprint", self.credentials.get_fingerprint(subject))
            .await?;

        match (refresh_token, stored.as_ref()) {
            (Some(token), Some(fingerprint)) => {
                let claims = self
                    .verifier
                    .verify(token, TokenKind::Refresh)
                    .filter(|claims| claims.sub == subject && fingerprint.matches(token));

                if let Some(claims) = claims {
                    self.revoke(&claims, TokenKind::Refresh).await?;
                    revoked += 1;

                    let outcome = self
                        .store(
                            "compare_and_set_fingerprint",
                            self.credentials
                                .compare_and_set_fingerprint(subject, fingerprint, None),
                        )
                        .await?;
                    cleared = outcome == CasOutcome::Swapped;
                    if !cleared {
                        tracing::debug!(subject = %subject, "Fingerprint changed during logout");
                    }
                }
            }
            (Some(_), None) => {}
            (None, Some(_)) => {
                self.store("clear_fingerprint", self.credentials.clear_fingerprint(subject))
                    .await?;
                cleared = true;
            }
            (None, None) => {}
        }

        if stored.is_none() && revoked == 0 {
            return Err(TokenError::NoRefreshTokenFound.into());
        }

        if revoked == 0 && !cleared {
            tracing::debug!(subject = %subject, "Logout presented no current token; session kept");
            return Ok(());
        }

        self.record(SecurityEvent::LoggedOut {
            subject: subject.to_string(),
            revoked,
        })
        .await;

        Ok(())
    }

    /// Check an access token; read-only
    pub async fn validate(&self, access_token: &str) -> DomainResult<Claims> {
        let claims = self
            .verifier
            .verify(access_token, TokenKind::Access)
            .ok_or(TokenError::InvalidToken)?;

        if self.store("is_revoked", self.ledger.is_revoked(&claims.jti)).await? {
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(claims)
    }

    /// Revoke a single access token before its expiry
    pub async fn revoke_access_token(&self, access_token: &str) -> DomainResult<()> {
        let claims = self
            .verifier
            .verify(access_token, TokenKind::Access)
            .ok_or(TokenError::InvalidToken)?;

        self.revoke(&claims, TokenKind::Access).await?;

        self.record(SecurityEvent::AccessTokenRevoked {
            subject: claims.sub.clone(),
            jti: claims.jti.clone(),
        })
        .await;

        Ok(())
    }

    /// Decode without verification; not for trust decisions
    pub fn decode(&self, token: &str) -> Option<Claims> {
        self.verifier.decode(token)
    }

    /// Drop ledger records for tokens that have expired anyway
    pub async fn purge_expired_revocations(&self) -> DomainResult<usize> {
        let purged = self
            .store("purge_expired", self.ledger.purge_expired(Utc::now()))
            .await?;

        if purged > 0 {
            tracing::info!(purged, "Purged expired revocation records");
        }
        Ok(purged)
    }

    async fn revoke(&self, claims: &Claims, kind: TokenKind) -> Result<(), StoreError> {
        let record = RevocationRecord::new(&claims.jti, &claims.sub, kind, claims.expires_at());
        self.store("revoke", self.ledger.revoke(record)).await
    }

    async fn resolve_principal(&self, subject: &str) -> DomainResult<Principal> {
        let Some(resolver) = &self.principals else {
            return Ok(Principal::new(subject));
        };

        match resolver.resolve(subject).await? {
            Some(principal) if principal.subject == subject => Ok(principal),
            Some(_) => Err(DomainError::Internal {
                message: "Principal resolver returned a different subject".to_string(),
            }),
            None => Ok(Principal::new(subject)),
        }
    }

    /// Apply the configured timeout to a store call
    async fn store<T, F>(&self, operation: &str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match self.config.store_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                tracing::warn!(operation, "Store call timed out");
                StoreError::Timeout {
                    operation: operation.to_string(),
                }
            })?,
            None => call.await,
        }
    }

    async fn record(&self, event: SecurityEvent) {
        let name = event.name();
        if let Err(e) = self.audit.record(event).await {
            tracing::warn!(event = name, error = %e, "Failed to record security event");
        }
    }

    fn pair(&self, access: IssuedToken, refresh: IssuedToken) -> TokenPair {
        TokenPair::new(
            access.token,
            refresh.token,
            self.issuer.expires_in(TokenKind::Access),
            self.issuer.expires_in(TokenKind::Refresh),
        )
    }
}
