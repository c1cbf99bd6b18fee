//! Claim set carried inside every token envelope.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EnvelopeError;

/// Role granted to a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Identity a session is issued for
///
/// Produced by the login collaborator (identity provider exchange, user
/// upsert) and turned into [`Claims`] by the token issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User identifier
    pub subject: String,

    /// Email address, if known
    pub email: Option<String>,

    /// Role, if assigned
    pub role: Option<Role>,
}

impl Principal {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: None,
            role: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// The subject-only view used for refresh tokens
    pub fn subject_only(&self) -> Self {
        Self::new(self.subject.clone())
    }
}

/// Claims structure encrypted into the token envelope
///
/// The schema is strict: unknown fields are rejected on deserialization and
/// [`Claims::validate`] is applied right after decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// JWT ID (unique identifier for the token, revocation key)
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `principal` with a fresh `jti`
    ///
    /// `iat` is back-dated by `clock_skew`; `exp` is `now + ttl`. Returns
    /// `None` when either timestamp falls outside the representable range.
    pub fn new(principal: &Principal, ttl: Duration, clock_skew: Duration) -> Option<Self> {
        let now = Utc::now();
        let issued_at = now.checked_sub_signed(clock_skew)?;
        let expires_at = now.checked_add_signed(ttl)?;

        Some(Self {
            sub: principal.subject.clone(),
            email: principal.email.clone(),
            role: principal.role,
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Remaining lifetime in seconds, zero once expired
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }

    /// The principal these claims were issued for
    pub fn principal(&self) -> Principal {
        Principal {
            subject: self.sub.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    /// Rejects structurally valid JSON that is not a usable claim set
    pub fn validate(&self) -> Result<(), EnvelopeError> {
        if self.sub.trim().is_empty() {
            return Err(EnvelopeError::InvalidClaims {
                message: "empty subject".to_string(),
            });
        }
        if self.jti.trim().is_empty() {
            return Err(EnvelopeError::InvalidClaims {
                message: "empty token id".to_string(),
            });
        }
        if self.iat > self.exp {
            return Err(EnvelopeError::InvalidClaims {
                message: "issued after expiry".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> Principal {
        Principal::new("u1").with_email("u1@example.com").with_role(Role::Admin)
    }

    #[test]
    fn test_new_claims_copy_principal() {
        let claims = Claims::new(&principal(), Duration::minutes(15), Duration::seconds(30)).unwrap();

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email.as_deref(), Some("u1@example.com"));
        assert_eq!(claims.role, Some(Role::Admin));
        assert!(!claims.jti.is_empty());
        assert!(!claims.is_expired());
        assert!(claims.validate().is_ok());
    }

    #[test]
    fn test_iat_is_backdated() {
        let before = Utc::now().timestamp();
        let claims = Claims::new(&principal(), Duration::minutes(15), Duration::seconds(30)).unwrap();

        assert!(claims.iat <= before - 29);
        assert!(claims.exp >= before + 15 * 60);
    }

    #[test]
    fn test_fresh_jti_per_claims() {
        let a = Claims::new(&principal(), Duration::minutes(15), Duration::zero()).unwrap();
        let b = Claims::new(&principal(), Duration::minutes(15), Duration::zero()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::new(&principal(), Duration::minutes(15), Duration::zero()).unwrap();
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert_eq!(claims.remaining_seconds(), 0);
    }

    #[test]
    fn test_validate_rejects_empty_subject() {
        let mut claims = Claims::new(&principal(), Duration::minutes(15), Duration::zero()).unwrap();
        claims.sub = String::new();
        assert!(matches!(claims.validate(), Err(EnvelopeError::InvalidClaims { .. })));
    }

    #[test]
    fn test_validate_rejects_inverted_times() {
        let mut claims = Claims::new(&principal(), Duration::minutes(15), Duration::zero()).unwrap();
        claims.iat = claims.exp + 10;
        assert!(claims.validate().is_err());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = r#"{"sub":"u1","jti":"j","iat":1,"exp":2,"admin":true}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_optional_fields_omitted() {
        let claims = Claims::new(&Principal::new("u2"), Duration::days(7), Duration::zero()).unwrap();
        let json = serde_json::to_string(&claims).unwrap();

        assert!(!json.contains("email"));
        assert!(!json.contains("role"));
    }

    #[test]
    fn test_unrepresentable_expiry_is_none() {
        assert!(Claims::new(&principal(), Duration::days(99_999_999), Duration::zero()).is_none());
        assert!(Claims::new(&principal(), Duration::minutes(15), Duration::days(99_999_999)).is_none());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
