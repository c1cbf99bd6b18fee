//! Redis implementation of the RevocationLedger trait
//!
//! One key per revoked id, written with `SET NX EX` so the first revocation
//! wins and the key disappears once the token would have expired anyway.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use sw_core::domain::entities::token::RevocationRecord;
use sw_core::errors::StoreError;
use sw_core::repositories::RevocationLedger;

use super::redis_client::RedisClient;

const KEY_PREFIX: &str = "revoked";

/// Redis-backed revocation ledger
#[derive(Clone)]
pub struct RedisRevocationLedger {
    client: RedisClient,
}

impl RedisRevocationLedger {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, jti: &str) -> String {
        self.client.make_key(&revocation_key(jti))
    }
}

pub(crate) fn revocation_key(jti: &str) -> String {
    format!("{}:{}", KEY_PREFIX, jti)
}

/// Seconds until `expires_at`, at least one so the write is never rejected
pub(crate) fn ttl_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (expires_at - now).num_seconds().max(1) as u64
}

#[async_trait]
impl RevocationLedger for RedisRevocationLedger {
    async fn is_revoked(&self, jti: &str) -> Result<bool, StoreError> {
        Ok(self.client.exists(&self.key(jti)).await?)
    }

    async fn revoke(&self, record: RevocationRecord) -> Result<(), StoreError> {
        let value = serde_json::to_string(&record).map_err(|e| StoreError::Corrupt {
            message: format!("Failed to encode revocation record: {}", e),
        })?;
        let ttl = ttl_seconds(record.expires_at, Utc::now());

        let written = self
            .client
            .set_nx_with_expiry(&self.key(&record.jti), &value, ttl)
            .await?;
        if !written {
            debug!("Token id already revoked, keeping first record");
        }
        Ok(())
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, StoreError> {
        // Keys carry their own expiry
        Ok(0)
    }
}
