//! MySQL implementation of the RevocationLedger trait.
//!
//! Revoked ids live in `revoked_tokens`, keyed by `jti`. `INSERT IGNORE`
//! keeps the first record when the same id is revoked twice.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use sw_core::domain::entities::token::RevocationRecord;
use sw_core::errors::StoreError;
use sw_core::repositories::RevocationLedger;

use crate::InfrastructureError;

/// MySQL-backed revocation ledger
#[derive(Clone)]
pub struct MySqlRevocationLedger {
    pool: MySqlPool,
}

impl MySqlRevocationLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationLedger for MySqlRevocationLedger {
    async fn is_revoked(&self, jti: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS revoked FROM revoked_tokens WHERE jti = ?")
            .bind(jti)
            .fetch_one(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        let count: i64 = row.try_get("revoked").map_err(InfrastructureError::Database)?;
        Ok(count > 0)
    }

    async fn revoke(&self, record: RevocationRecord) -> Result<(), StoreError> {
        let query = r#"
            INSERT IGNORE INTO revoked_tokens (
                jti, user_id, token_type, expires_at, revoked_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&record.jti)
            .bind(&record.subject)
            .bind(record.kind.as_str())
            .bind(record.expires_at)
            .bind(record.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        if result.rows_affected() == 0 {
            tracing::debug!("Token id already revoked, keeping first record");
        }
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        Ok(result.rows_affected() as usize)
    }
}
