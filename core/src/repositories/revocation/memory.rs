//! In-memory implementation of RevocationLedger

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevocationRecord;
use crate::errors::StoreError;

use super::r#trait::RevocationLedger;

/// Process-local revocation ledger
///
/// Suitable for tests and single-instance deployments.
#[derive(Clone)]
pub struct InMemoryRevocationLedger {
    records: Arc<RwLock<HashMap<String, RevocationRecord>>>,
}

impl InMemoryRevocationLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a stored record
    pub async fn get(&self, jti: &str) -> Option<RevocationRecord> {
        self.records.read().await.get(jti).cloned()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryRevocationLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationLedger for InMemoryRevocationLedger {
    async fn is_revoked(&self, jti: &str) -> Result<bool, StoreError> {
        let records = self.records.read().await;
        Ok(records.contains_key(jti))
    }

    async fn revoke(&self, record: RevocationRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;

        // First revocation wins
        records.entry(record.jti.clone()).or_insert(record);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| !record.is_expired_at(now));

        Ok(initial_count - records.len())
    }
}
