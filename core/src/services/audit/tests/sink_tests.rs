//! Unit tests for audit sinks and events

use crate::services::audit::{AuditSink, MemoryAuditSink, ReuseReason, SecurityEvent, TracingAuditSink};

fn reuse_event() -> SecurityEvent {
    SecurityEvent::TokenReused {
        subject: "u1".to_string(),
        jti: "jti-1".to_string(),
        reason: ReuseReason::LostRace,
    }
}

#[tokio::test]
async fn test_memory_sink_records_in_order() {
    let sink = MemoryAuditSink::new();

    sink.record(SecurityEvent::SessionIssued {
        subject: "u1".to_string(),
        refresh_jti: "jti-1".to_string(),
    })
    .await
    .unwrap();
    sink.record(reuse_event()).await.unwrap();

    let events = sink.events().await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name(), "session_issued");
    assert_eq!(events[1], reuse_event());
    assert_eq!(sink.events_named("token_reused").await.len(), 1);

    sink.clear().await;
    assert!(sink.events().await.is_empty());
}

#[tokio::test]
async fn test_tracing_sink_never_fails() {
    let sink = TracingAuditSink;

    assert!(sink.record(reuse_event()).await.is_ok());
    assert!(sink
        .record(SecurityEvent::LoggedOut {
            subject: "u1".to_string(),
            revoked: 2,
        })
        .await
        .is_ok());
}

#[test]
fn test_event_classification() {
    let replay = SecurityEvent::RevokedTokenReplay {
        subject: "u2".to_string(),
        jti: "jti-9".to_string(),
    };
    let rotated = SecurityEvent::TokenRotated {
        subject: "u2".to_string(),
        old_jti: "a".to_string(),
        new_jti: "b".to_string(),
    };

    assert!(replay.is_suspicious());
    assert!(reuse_event().is_suspicious());
    assert!(!rotated.is_suspicious());
    assert_eq!(replay.subject(), "u2");
}

#[test]
fn test_event_serialization_is_tagged() {
    let json = serde_json::to_value(reuse_event()).unwrap();

    assert_eq!(json["event"], "token_reused");
    assert_eq!(json["reason"], "lost_race");
    assert_eq!(json["subject"], "u1");
}
