mod concurrency_tests;

use std::sync::Arc;

use crate::domain::entities::claims::{Principal, Role};
use crate::repositories::{CredentialStore, InMemoryCredentialStore, InMemoryRevocationLedger, RevocationLedger};
use crate::services::audit::MemoryAuditSink;
use crate::services::codec::{ClaimCodec, PaddedPassphrase};
use crate::services::token::{TokenConfig, TokenIssuer, TokenVerifier};

use super::{RotationConfig, RotationCoordinator};

pub(super) struct Harness {
    pub coordinator: RotationCoordinator<InMemoryRevocationLedger, InMemoryCredentialStore>,
    pub ledger: Arc<InMemoryRevocationLedger>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub audit: MemoryAuditSink,
}

pub(super) fn token_config() -> TokenConfig {
    TokenConfig::new("rotation-access-secret", "rotation-refresh-secret")
}

pub(super) fn coordinator_with<L, C>(
    config: TokenConfig,
    ledger: Arc<L>,
    credentials: Arc<C>,
) -> RotationCoordinator<L, C>
where
    L: RevocationLedger,
    C: CredentialStore,
{
    let codec = ClaimCodec::new("rotation-envelope-secret", &PaddedPassphrase);
    let verifier = TokenVerifier::new(&config, codec.clone());
    let issuer = TokenIssuer::new(config, codec);

    RotationCoordinator::new(issuer, verifier, ledger, credentials).with_config(RotationConfig::unbounded())
}

pub(super) fn harness_with_config(config: TokenConfig) -> Harness {
    let ledger = Arc::new(InMemoryRevocationLedger::new());
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let audit = MemoryAuditSink::new();

    let coordinator = coordinator_with(config, ledger.clone(), credentials.clone())
        .with_audit_sink(Arc::new(audit.clone()));

    Harness {
        coordinator,
        ledger,
        credentials,
        audit,
    }
}

pub(super) fn harness() -> Harness {
    harness_with_config(token_config())
}

pub(super) fn principal(subject: &str) -> Principal {
    Principal::new(subject)
        .with_email(format!("{}@example.com", subject))
        .with_role(Role::User)
}
