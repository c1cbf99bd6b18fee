//! Token, revocation and credential entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Fingerprint;

/// Which secret a token is signed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            other => Err(format!("Unknown token kind: {}", other)),
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

/// Entry in the revocation ledger
///
/// Presence alone proves revocation. Records may be purged once
/// `expires_at` has passed because the token would fail verification anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// Revoked token identifier
    pub jti: String,

    /// Subject the token was issued to
    pub subject: String,

    /// Kind of the revoked token
    pub kind: TokenKind,

    /// When the token would have expired naturally
    pub expires_at: DateTime<Utc>,

    /// When the revocation was recorded
    pub revoked_at: DateTime<Utc>,
}

impl RevocationRecord {
    pub fn new(
        jti: impl Into<String>,
        subject: impl Into<String>,
        kind: TokenKind,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            jti: jti.into(),
            subject: subject.into(),
            kind,
            expires_at,
            revoked_at: Utc::now(),
        }
    }

    /// Whether the record can be purged at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Per-subject record of the single live refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// User identifier
    pub subject: String,

    /// Fingerprint of the current refresh token, `None` after logout
    pub refresh_fingerprint: Option<Fingerprint>,

    /// Last time the fingerprint changed
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn new(subject: impl Into<String>, refresh_fingerprint: Option<Fingerprint>) -> Self {
        Self {
            subject: subject.into(),
            refresh_fingerprint,
            updated_at: Utc::now(),
        }
    }

    /// Whether the subject currently has a session
    pub fn has_session(&self) -> bool {
        self.refresh_fingerprint.is_some()
    }
}
