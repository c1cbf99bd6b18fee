//! Security events emitted by the rotation coordinator

use serde::{Deserialize, Serialize};

/// Why a refresh attempt was treated as token reuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReuseReason {
    /// The presented token no longer matches the stored fingerprint
    FingerprintMismatch,
    /// Another refresh swapped the fingerprint first
    LostRace,
}

impl ReuseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReuseReason::FingerprintMismatch => "fingerprint_mismatch",
            ReuseReason::LostRace => "lost_race",
        }
    }
}

/// Auditable token lifecycle event
///
/// Carries identifiers only: never raw tokens or fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SecurityEvent {
    SessionIssued {
        subject: String,
        refresh_jti: String,
    },
    TokenRotated {
        subject: String,
        old_jti: String,
        new_jti: String,
    },
    TokenReused {
        subject: String,
        jti: String,
        reason: ReuseReason,
    },
    RevokedTokenReplay {
        subject: String,
        jti: String,
    },
    LoggedOut {
        subject: String,
        revoked: usize,
    },
    AccessTokenRevoked {
        subject: String,
        jti: String,
    },
}

impl SecurityEvent {
    /// Stable event name
    pub fn name(&self) -> &'static str {
        match self {
            SecurityEvent::SessionIssued { .. } => "session_issued",
            SecurityEvent::TokenRotated { .. } => "token_rotated",
            SecurityEvent::TokenReused { .. } => "token_reused",
            SecurityEvent::RevokedTokenReplay { .. } => "revoked_token_replay",
            SecurityEvent::LoggedOut { .. } => "logged_out",
            SecurityEvent::AccessTokenRevoked { .. } => "access_token_revoked",
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            SecurityEvent::SessionIssued { subject, .. }
            | SecurityEvent::TokenRotated { subject, .. }
            | SecurityEvent::TokenReused { subject, .. }
            | SecurityEvent::RevokedTokenReplay { subject, .. }
            | SecurityEvent::LoggedOut { subject, .. }
            | SecurityEvent::AccessTokenRevoked { subject, .. } => subject,
        }
    }

    /// Whether the event points at a possibly stolen token
    pub fn is_suspicious(&self) -> bool {
        matches!(
            self,
            SecurityEvent::TokenReused { .. } | SecurityEvent::RevokedTokenReplay { .. }
        )
    }
}
