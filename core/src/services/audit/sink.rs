//! Audit sinks
//!
//! Recording is best effort. Callers log and drop sink errors so an audit
//! outage never changes the outcome of a token operation.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainResult;

use super::event::SecurityEvent;

/// Tracing target for security events
pub const SECURITY_TARGET: &str = "security";

/// Destination for security events
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: SecurityEvent) -> DomainResult<()>;
}

/// Writes events as structured `tracing` events on the `security` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, event: SecurityEvent) -> DomainResult<()> {
        match &event {
            SecurityEvent::TokenReused { subject, jti, reason } => {
                tracing::warn!(
                    target: SECURITY_TARGET,
                    event = event.name(),
                    subject = %subject,
                    jti = %jti,
                    reason = reason.as_str(),
                    "Refresh token reuse detected"
                );
            }
            SecurityEvent::RevokedTokenReplay { subject, jti } => {
                tracing::warn!(
                    target: SECURITY_TARGET,
                    event = event.name(),
                    subject = %subject,
                    jti = %jti,
                    "Revoked refresh token presented"
                );
            }
            SecurityEvent::SessionIssued { subject, refresh_jti } => {
                tracing::info!(
                    target: SECURITY_TARGET,
                    event = event.name(),
                    subject = %subject,
                    jti = %refresh_jti,
                    "Session issued"
                );
            }
            SecurityEvent::TokenRotated { subject, old_jti, new_jti } => {
                tracing::info!(
                    target: SECURITY_TARGET,
                    event = event.name(),
                    subject = %subject,
                    old_jti = %old_jti,
                    new_jti = %new_jti,
                    "Refresh token rotated"
                );
            }
            SecurityEvent::LoggedOut { subject, revoked } => {
                tracing::info!(
                    target: SECURITY_TARGET,
                    event = event.name(),
                    subject = %subject,
                    revoked = *revoked,
                    "Session logged out"
                );
            }
            SecurityEvent::AccessTokenRevoked { subject, jti } => {
                tracing::info!(
                    target: SECURITY_TARGET,
                    event = event.name(),
                    subject = %subject,
                    jti = %jti,
                    "Access token revoked"
                );
            }
        }
        Ok(())
    }
}

/// Keeps events in memory, for tests and local inspection
#[derive(Clone, Default)]
pub struct MemoryAuditSink {
    events: Arc<RwLock<Vec<SecurityEvent>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, oldest first
    pub async fn events(&self) -> Vec<SecurityEvent> {
        self.events.read().await.clone()
    }

    /// Events whose name matches
    pub async fn events_named(&self, name: &str) -> Vec<SecurityEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.name() == name)
            .cloned()
            .collect()
    }

    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, event: SecurityEvent) -> DomainResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
