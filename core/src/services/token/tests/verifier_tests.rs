//! Unit tests for token verification

use chrono::Duration;

use crate::domain::entities::claims::{Principal, Role};
use crate::domain::entities::token::TokenKind;
use crate::services::codec::{ClaimCodec, Sha256Passphrase};
use crate::services::token::{TokenConfig, TokenVerifier};

use super::{issuer_and_verifier, test_config};

fn principal() -> Principal {
    Principal::new("u1").with_email("u1@example.com").with_role(Role::User)
}

#[test]
fn test_fresh_pair_verifies() {
    let (issuer, verifier) = issuer_and_verifier(test_config());

    let access = issuer.issue_access(&principal()).unwrap();
    let refresh = issuer.issue_refresh(&principal()).unwrap();

    let access_claims = verifier.verify(&access.token, TokenKind::Access).unwrap();
    let refresh_claims = verifier.verify(&refresh.token, TokenKind::Refresh).unwrap();

    assert_eq!(access_claims, access.claims);
    assert_eq!(refresh_claims, refresh.claims);
    assert_eq!(access_claims.sub, refresh_claims.sub);
    assert_ne!(access_claims.jti, refresh_claims.jti);
}

#[test]
fn test_kinds_do_not_cross_verify() {
    let (issuer, verifier) = issuer_and_verifier(test_config());

    let access = issuer.issue_access(&principal()).unwrap();
    let refresh = issuer.issue_refresh(&principal()).unwrap();

    assert!(verifier.verify(&access.token, TokenKind::Refresh).is_none());
    assert!(verifier.verify(&refresh.token, TokenKind::Access).is_none());
}

#[test]
fn test_other_secret_rejected() {
    let (issuer, _) = issuer_and_verifier(test_config());
    let (_, other_verifier) = issuer_and_verifier(TokenConfig::new("other-access", "other-refresh"));

    let access = issuer.issue_access(&principal()).unwrap();

    assert!(other_verifier.verify(&access.token, TokenKind::Access).is_none());
}

#[test]
fn test_expired_token_rejected() {
    let config = test_config().with_access_ttl(Duration::seconds(-5));
    let (issuer, verifier) = issuer_and_verifier(config);

    let access = issuer.issue_access(&principal()).unwrap();

    assert!(verifier.verify(&access.token, TokenKind::Access).is_none());
    // Still inspectable
    assert_eq!(verifier.decode(&access.token).unwrap().sub, "u1");
}

#[test]
fn test_tampered_token_rejected() {
    let (issuer, verifier) = issuer_and_verifier(test_config());
    let access = issuer.issue_access(&principal()).unwrap();

    let mut parts: Vec<String> = access.token.split('.').map(str::to_string).collect();
    parts[2] = parts[2].chars().rev().collect();
    let tampered = parts.join(".");

    assert!(verifier.verify(&tampered, TokenKind::Access).is_none());
}

#[test]
fn test_garbage_rejected() {
    let (_, verifier) = issuer_and_verifier(test_config());

    assert!(verifier.verify("", TokenKind::Access).is_none());
    assert!(verifier.verify("not-a-token", TokenKind::Refresh).is_none());
    assert!(verifier.decode("a.b.c").is_none());
}

#[test]
fn test_wrong_envelope_key_rejected() {
    let config = test_config();
    let (issuer, _) = issuer_and_verifier(config.clone());
    let verifier = TokenVerifier::new(&config, ClaimCodec::new("different", &Sha256Passphrase));

    let access = issuer.issue_access(&principal()).unwrap();

    assert!(verifier.verify(&access.token, TokenKind::Access).is_none());
    assert!(verifier.decode(&access.token).is_none());
}

#[test]
fn test_decode_ignores_signature() {
    let (issuer, _) = issuer_and_verifier(test_config());
    let (_, other_verifier) = issuer_and_verifier(TokenConfig::new("other-access", "other-refresh"));

    let refresh = issuer.issue_refresh(&principal()).unwrap();

    let claims = other_verifier.decode(&refresh.token).unwrap();
    assert_eq!(claims.jti, refresh.claims.jti);
}
