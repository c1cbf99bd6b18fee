//! MySQL implementation of the CredentialStore trait.
//!
//! One row per subject in `session_credentials`. A NULL fingerprint means
//! the subject has no active session. Compare-and-set is a conditional
//! `UPDATE` whose affected row count decides the outcome.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};

use sw_core::domain::value_objects::Fingerprint;
use sw_core::errors::StoreError;
use sw_core::repositories::{CasOutcome, CredentialStore};

use crate::InfrastructureError;

/// MySQL-backed credential store
#[derive(Clone)]
pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn get_fingerprint(&self, subject: &str) -> Result<Option<Fingerprint>, StoreError> {
        let row = sqlx::query("SELECT refresh_fingerprint FROM session_credentials WHERE user_id = ?")
            .bind(subject)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored: Option<String> = row
            .try_get("refresh_fingerprint")
            .map_err(InfrastructureError::Database)?;
        Ok(stored.map(Fingerprint::from_stored))
    }

    async fn set_fingerprint(&self, subject: &str, fingerprint: &Fingerprint) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO session_credentials (user_id, refresh_fingerprint, updated_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE
                refresh_fingerprint = VALUES(refresh_fingerprint),
                updated_at = VALUES(updated_at)
        "#;

        sqlx::query(query)
            .bind(subject)
            .bind(fingerprint.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        Ok(())
    }

    async fn compare_and_set_fingerprint(
        &self,
        subject: &str,
        expected: &Fingerprint,
        new: Option<&Fingerprint>,
    ) -> Result<CasOutcome, StoreError> {
        let query = r#"
            UPDATE session_credentials
            SET refresh_fingerprint = ?, updated_at = ?
            WHERE user_id = ? AND refresh_fingerprint = ?
        "#;

        let result = sqlx::query(query)
            .bind(new.map(|f| f.as_str()))
            .bind(Utc::now())
            .bind(subject)
            .bind(expected.as_str())
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        Ok(if result.rows_affected() == 1 {
            CasOutcome::Swapped
        } else {
            CasOutcome::Conflict
        })
    }

    async fn clear_fingerprint(&self, subject: &str) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE session_credentials SET refresh_fingerprint = NULL, updated_at = ? WHERE user_id = ?",
        )
        .bind(Utc::now())
        .bind(subject)
        .execute(&self.pool)
        .await
        .map_err(InfrastructureError::Database)?;

        Ok(())
    }
}
