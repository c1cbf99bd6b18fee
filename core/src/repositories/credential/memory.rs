//! In-memory implementation of CredentialStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::CredentialRecord;
use crate::domain::value_objects::Fingerprint;
use crate::errors::StoreError;

use super::r#trait::{CasOutcome, CredentialStore};

/// Process-local credential store keyed by subject
#[derive(Clone)]
pub struct InMemoryCredentialStore {
    records: Arc<RwLock<HashMap<String, CredentialRecord>>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Full record for a subject, including logged-out ones
    pub async fn record(&self, subject: &str) -> Option<CredentialRecord> {
        self.records.read().await.get(subject).cloned()
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get_fingerprint(&self, subject: &str) -> Result<Option<Fingerprint>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(subject)
            .and_then(|record| record.refresh_fingerprint.clone()))
    }

    async fn set_fingerprint(&self, subject: &str, fingerprint: &Fingerprint) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(
            subject.to_string(),
            CredentialRecord::new(subject, Some(fingerprint.clone())),
        );
        Ok(())
    }

    async fn compare_and_set_fingerprint(
        &self,
        subject: &str,
        expected: &Fingerprint,
        new: Option<&Fingerprint>,
    ) -> Result<CasOutcome, StoreError> {
        // Read and write under one lock acquisition
        let mut records = self.records.write().await;

        let current = records
            .get(subject)
            .and_then(|record| record.refresh_fingerprint.as_ref());
        if current != Some(expected) {
            return Ok(CasOutcome::Conflict);
        }

        records.insert(
            subject.to_string(),
            CredentialRecord::new(subject, new.cloned()),
        );
        Ok(CasOutcome::Swapped)
    }

    async fn clear_fingerprint(&self, subject: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(subject) {
            *record = CredentialRecord::new(subject, None);
        }
        Ok(())
    }
}
