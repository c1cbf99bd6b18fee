//! Unit tests for the in-memory credential store

use std::sync::Arc;

use crate::domain::value_objects::Fingerprint;
use crate::repositories::credential::{CasOutcome, CredentialStore, InMemoryCredentialStore};

#[tokio::test]
async fn test_set_and_get_fingerprint() {
    let store = InMemoryCredentialStore::new();
    let fingerprint = Fingerprint::compute("refresh-1");

    assert!(store.get_fingerprint("u1").await.unwrap().is_none());

    store.set_fingerprint("u1", &fingerprint).await.unwrap();

    let stored = store.get_fingerprint("u1").await.unwrap().unwrap();
    assert_eq!(stored, fingerprint);
    assert!(stored.matches("refresh-1"));
}

#[tokio::test]
async fn test_set_overwrites_previous_session() {
    let store = InMemoryCredentialStore::new();

    store.set_fingerprint("u1", &Fingerprint::compute("old")).await.unwrap();
    store.set_fingerprint("u1", &Fingerprint::compute("new")).await.unwrap();

    let stored = store.get_fingerprint("u1").await.unwrap().unwrap();
    assert!(stored.matches("new"));
    assert!(!stored.matches("old"));
}

#[tokio::test]
async fn test_compare_and_set_swaps_on_match() {
    let store = InMemoryCredentialStore::new();
    let current = Fingerprint::compute("r1");
    let next = Fingerprint::compute("r2");
    store.set_fingerprint("u1", &current).await.unwrap();

    let outcome = store
        .compare_and_set_fingerprint("u1", &current, Some(&next))
        .await
        .unwrap();

    assert_eq!(outcome, CasOutcome::Swapped);
    assert_eq!(store.get_fingerprint("u1").await.unwrap(), Some(next));
}

#[tokio::test]
async fn test_compare_and_set_conflicts_on_stale_expected() {
    let store = InMemoryCredentialStore::new();
    let current = Fingerprint::compute("r1");
    let stale = Fingerprint::compute("r1");
    store.set_fingerprint("u1", &current).await.unwrap();

    // Same token, different salt: not the stored value
    let outcome = store
        .compare_and_set_fingerprint("u1", &stale, Some(&Fingerprint::compute("r2")))
        .await
        .unwrap();

    assert_eq!(outcome, CasOutcome::Conflict);
    assert_eq!(store.get_fingerprint("u1").await.unwrap(), Some(current));
}

#[tokio::test]
async fn test_compare_and_set_unknown_subject_conflicts() {
    let store = InMemoryCredentialStore::new();

    let outcome = store
        .compare_and_set_fingerprint("ghost", &Fingerprint::compute("r1"), None)
        .await
        .unwrap();

    assert_eq!(outcome, CasOutcome::Conflict);
}

#[tokio::test]
async fn test_compare_and_set_to_none_clears() {
    let store = InMemoryCredentialStore::new();
    let current = Fingerprint::compute("r1");
    store.set_fingerprint("u1", &current).await.unwrap();

    let outcome = store.compare_and_set_fingerprint("u1", &current, None).await.unwrap();

    assert!(outcome.is_swapped());
    assert!(store.get_fingerprint("u1").await.unwrap().is_none());
    assert!(!store.record("u1").await.unwrap().has_session());
}

#[tokio::test]
async fn test_clear_fingerprint() {
    let store = InMemoryCredentialStore::new();
    store.set_fingerprint("u1", &Fingerprint::compute("r1")).await.unwrap();

    store.clear_fingerprint("u1").await.unwrap();
    store.clear_fingerprint("never-seen").await.unwrap();

    assert!(store.get_fingerprint("u1").await.unwrap().is_none());
    assert!(store.record("never-seen").await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_compare_and_set_single_winner() {
    let store = Arc::new(InMemoryCredentialStore::new());
    let current = Fingerprint::compute("r1");
    store.set_fingerprint("u1", &current).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        let expected = current.clone();
        handles.push(tokio::spawn(async move {
            let next = Fingerprint::compute(&format!("r2-{}", i));
            store
                .compare_and_set_fingerprint("u1", &expected, Some(&next))
                .await
                .unwrap()
        }));
    }

    let mut swapped = 0;
    for handle in handles {
        if handle.await.unwrap().is_swapped() {
            swapped += 1;
        }
    }

    assert_eq!(swapped, 1);
}
