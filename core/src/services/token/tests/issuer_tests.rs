//! Unit tests for token issuance

use chrono::{Duration, Utc};
use sw_shared::JwtConfig;

use crate::domain::entities::claims::{Principal, Role};
use crate::domain::entities::token::TokenKind;
use crate::errors::DomainError;
use crate::services::token::TokenConfig;

use super::{issuer_and_verifier, test_config};

fn principal() -> Principal {
    Principal::new("u1").with_email("u1@example.com").with_role(Role::Admin)
}

#[test]
fn test_issue_access_carries_principal() {
    let (issuer, _) = issuer_and_verifier(test_config());

    let issued = issuer.issue_access(&principal()).unwrap();

    assert_eq!(issued.token.split('.').count(), 3);
    assert_eq!(issued.claims.sub, "u1");
    assert_eq!(issued.claims.email.as_deref(), Some("u1@example.com"));
    assert_eq!(issued.claims.role, Some(Role::Admin));
}

#[test]
fn test_issue_refresh_carries_subject_only() {
    let (issuer, _) = issuer_and_verifier(test_config());

    let issued = issuer.issue_refresh(&principal()).unwrap();

    assert_eq!(issued.claims.sub, "u1");
    assert!(issued.claims.email.is_none());
    assert!(issued.claims.role.is_none());
}

#[test]
fn test_lifetimes_and_skew() {
    let (issuer, _) = issuer_and_verifier(test_config());
    let now = Utc::now().timestamp();

    let access = issuer.issue_access(&principal()).unwrap().claims;
    let refresh = issuer.issue_refresh(&principal()).unwrap().claims;

    assert!((access.exp - now - 15 * 60).abs() <= 1);
    assert!((refresh.exp - now - 7 * 24 * 60 * 60).abs() <= 1);
    assert!((now - access.iat - 30).abs() <= 1);
    assert_eq!(issuer.expires_in(TokenKind::Access), 900);
    assert_eq!(issuer.expires_in(TokenKind::Refresh), 604800);
}

#[test]
fn test_out_of_range_lifetime_is_an_error() {
    let config = test_config().with_access_ttl(Duration::days(99_999_999));
    let (issuer, _) = issuer_and_verifier(config);

    let err = issuer.issue_access(&principal()).unwrap_err();

    assert!(matches!(err, DomainError::Internal { .. }));
    assert!(issuer.issue_refresh(&principal()).is_ok());
}

#[test]
fn test_payload_does_not_leak_claims() {
    let (issuer, _) = issuer_and_verifier(test_config());

    let issued = issuer.issue_access(&principal()).unwrap();

    assert!(!issued.token.contains("u1@example.com"));
}

#[test]
fn test_fresh_jti_per_token() {
    let (issuer, _) = issuer_and_verifier(test_config());

    let a = issuer.issue_access(&principal()).unwrap();
    let b = issuer.issue_refresh(&principal()).unwrap();
    let c = issuer.issue_refresh(&principal()).unwrap();

    assert_ne!(a.claims.jti, b.claims.jti);
    assert_ne!(b.claims.jti, c.claims.jti);
    assert_ne!(b.token, c.token);
}

#[test]
fn test_config_from_shared() {
    let shared = JwtConfig::new("a-secret", "r-secret").with_access_expiry_minutes(5);
    let config = TokenConfig::from_jwt(&shared).unwrap();

    assert_eq!(config.access_ttl, Duration::minutes(5));
    assert_eq!(config.refresh_ttl, Duration::days(7));
    assert_eq!(config.clock_skew, Duration::seconds(30));
    assert_eq!(config.secret(TokenKind::Refresh), "r-secret");
}

#[test]
fn test_config_rejects_shared_secret() {
    let shared = JwtConfig::new("same", "same");
    assert!(TokenConfig::from_jwt(&shared).is_err());
}

#[test]
fn test_config_debug_hides_secrets() {
    let debug = format!("{:?}", test_config());
    assert!(!debug.contains("access-secret-for-tests"));
    assert!(!debug.contains("refresh-secret-for-tests"));
}
