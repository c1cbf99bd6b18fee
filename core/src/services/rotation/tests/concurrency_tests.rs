//! Concurrent rotation tests

use std::sync::Arc;

use crate::errors::TokenError;
use crate::repositories::{CredentialStore, InMemoryRevocationLedger, RevocationLedger};
use crate::services::audit::{MemoryAuditSink, ReuseReason, SecurityEvent};

use super::mocks::RacingCredentialStore;
use super::{coordinator_with, harness, principal, token_config};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refresh_yields_single_pair() {
    let h = harness();
    let pair = h.coordinator.issue_on_login(&principal("u1")).await.unwrap();
    let coordinator = Arc::new(h.coordinator);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let coordinator = coordinator.clone();
        let token = pair.refresh_token.clone();
        handles.push(tokio::spawn(async move { coordinator.refresh(&token).await }));
    }

    let mut winners = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(rotated) => winners.push(rotated),
            Err(e) => assert!(matches!(
                e.token_error(),
                Some(TokenError::TokenReused) | Some(TokenError::TokenRevoked)
            )),
        }
    }

    assert_eq!(winners.len(), 1);
    let stored = h.credentials.get_fingerprint("u1").await.unwrap().unwrap();
    assert!(stored.matches(&winners[0].refresh_token));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sessions_are_independent() {
    let h = harness();
    let coordinator = Arc::new(h.coordinator);

    let mut handles = Vec::new();
    for i in 0..8 {
        let coordinator = coordinator.clone();
        handles.push(tokio::spawn(async move {
            let subject = format!("user-{}", i);
            let pair = coordinator.issue_on_login(&principal(&subject)).await.unwrap();
            coordinator.refresh(&pair.refresh_token).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_loser_never_gets_a_live_session() {
    let h = harness();
    let pair = h.coordinator.issue_on_login(&principal("u1")).await.unwrap();
    let coordinator = Arc::new(h.coordinator);

    let (a, b) = tokio::join!(
        coordinator.refresh(&pair.refresh_token),
        coordinator.refresh(&pair.refresh_token)
    );

    assert!(a.is_ok() != b.is_ok());
    let winner = a.or(b).unwrap();
    assert!(coordinator.refresh(&winner.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_lost_compare_and_set_is_reuse() {
    let ledger = Arc::new(InMemoryRevocationLedger::new());
    let credentials = Arc::new(RacingCredentialStore::new("rival-refresh-token"));
    let audit = MemoryAuditSink::new();
    let coordinator = coordinator_with(token_config(), ledger.clone(), credentials.clone())
        .with_audit_sink(Arc::new(audit.clone()));

    let pair = coordinator.issue_on_login(&principal("u1")).await.unwrap();
    let jti = coordinator.decode(&pair.refresh_token).unwrap().jti;

    let err = coordinator.refresh(&pair.refresh_token).await.unwrap_err();

    assert_eq!(err.token_error(), Some(TokenError::TokenReused));
    assert!(ledger.is_revoked(&jti).await.unwrap());
    assert_eq!(
        audit.events_named("token_reused").await,
        vec![SecurityEvent::TokenReused {
            subject: "u1".to_string(),
            jti,
            reason: ReuseReason::LostRace,
        }]
    );
    assert!(audit.events_named("token_rotated").await.is_empty());

    // The rival's fingerprint stays in place
    let stored = credentials.get_fingerprint("u1").await.unwrap().unwrap();
    assert!(stored.matches("rival-refresh-token"));
}
