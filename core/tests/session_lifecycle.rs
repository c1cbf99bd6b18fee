//! End-to-end session lifecycle through the public API

use std::collections::HashMap;
use std::sync::Arc;

use sw_core::{
    InMemoryCredentialStore, InMemoryRevocationLedger, MemoryAuditSink, Principal, RevocationLedger,
    Role, RotationCoordinator, TokenError,
};
use sw_shared::AuthConfig;

type Coordinator = RotationCoordinator<InMemoryRevocationLedger, InMemoryCredentialStore>;

fn auth_config(derivation: &str) -> AuthConfig {
    let env: HashMap<&str, String> = HashMap::from([
        ("JWT_ACCESS_SECRET", "integration-access".to_string()),
        ("JWT_REFRESH_SECRET", "integration-refresh".to_string()),
        ("AES_SECRET_KEY", "integration-envelope".to_string()),
        ("AES_KEY_DERIVATION", derivation.to_string()),
        ("JWT_ACCESS_EXPIRE_IN", "10m".to_string()),
    ]);
    AuthConfig::from_lookup(|key| env.get(key).cloned()).expect("valid configuration")
}

fn setup(derivation: &str) -> (Coordinator, Arc<InMemoryRevocationLedger>, MemoryAuditSink) {
    let ledger = Arc::new(InMemoryRevocationLedger::new());
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let audit = MemoryAuditSink::new();

    let coordinator = RotationCoordinator::from_config(&auth_config(derivation), ledger.clone(), credentials)
        .expect("coordinator")
        .with_audit_sink(Arc::new(audit.clone()));

    (coordinator, ledger, audit)
}

#[tokio::test]
async fn test_issue_refresh_replay_scenario() {
    let (coordinator, ledger, audit) = setup("padded");
    let u1 = Principal::new("u1").with_email("u1@example.com").with_role(Role::User);

    // issue u1 -> {A1, R1}
    let first = coordinator.issue_on_login(&u1).await.unwrap();
    assert_eq!(first.access_expires_in, 600);
    let r1_jti = coordinator.decode(&first.refresh_token).unwrap().jti;

    // refresh(R1) -> {A2, R2}; R1's id is revoked
    let second = coordinator.refresh(&first.refresh_token).await.unwrap();
    assert!(ledger.is_revoked(&r1_jti).await.unwrap());

    // refresh(R1) again fails
    let err = coordinator.refresh(&first.refresh_token).await.unwrap_err();
    assert!(matches!(
        err.token_error(),
        Some(TokenError::TokenReused) | Some(TokenError::TokenRevoked)
    ));

    // A1 is still valid until expiry
    let claims = coordinator.validate(&first.access_token).await.unwrap();
    assert_eq!(claims.sub, "u1");

    // R2 keeps working
    let third = coordinator.refresh(&second.refresh_token).await.unwrap();
    assert!(coordinator.validate(&third.access_token).await.is_ok());

    let names: Vec<&str> = audit.events().await.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec!["session_issued", "token_rotated", "revoked_token_replay", "token_rotated"]
    );
}

#[tokio::test]
async fn test_logout_then_refresh_fails() {
    let (coordinator, _, _) = setup("sha256");
    let pair = coordinator.issue_on_login(&Principal::new("u2")).await.unwrap();

    coordinator
        .logout("u2", Some(&pair.access_token), Some(&pair.refresh_token))
        .await
        .unwrap();

    assert!(coordinator.refresh(&pair.refresh_token).await.is_err());
    assert_eq!(
        coordinator.validate(&pair.access_token).await.unwrap_err().token_error(),
        Some(TokenError::TokenRevoked)
    );
    assert_eq!(
        coordinator.logout("u2", None, None).await.unwrap_err().token_error(),
        Some(TokenError::NoRefreshTokenFound)
    );
}

#[tokio::test]
async fn test_tokens_do_not_cross_deployments() {
    let (padded, _, _) = setup("padded");
    let (hashed, _, _) = setup("sha256");

    let pair = padded.issue_on_login(&Principal::new("u3")).await.unwrap();

    assert_eq!(
        hashed.validate(&pair.access_token).await.unwrap_err().token_error(),
        Some(TokenError::InvalidToken)
    );
}
