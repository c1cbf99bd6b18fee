//! Revocation ledger trait defining the interface for revoked token ids.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevocationRecord;
use crate::errors::StoreError;

/// Set of revoked token identifiers
///
/// # Consistency
/// - `revoke` must be idempotent: revoking an already revoked id succeeds
///   and keeps the first record.
/// - A revocation must be visible to every subsequent `is_revoked` call,
///   from any process sharing the backing store.
/// - Records may be dropped once their `expires_at` has passed.
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Check whether a token id has been revoked
    ///
    /// # Returns
    /// * `Ok(true)` - The id is in the ledger
    /// * `Ok(false)` - The id was never revoked (or its record was purged)
    /// * `Err(StoreError)` - The backing store failed
    async fn is_revoked(&self, jti: &str) -> Result<bool, StoreError>;

    /// Record a revocation
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use sw_core::domain::entities::token::{RevocationRecord, TokenKind};
    /// # use sw_core::repositories::RevocationLedger;
    /// # async fn example(ledger: &impl RevocationLedger) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = RevocationRecord::new(
    ///     "0b7f4c1e-5a1d-4bb4-9a63-7c1b3f0a2d11",
    ///     "user-1",
    ///     TokenKind::Refresh,
    ///     Utc::now() + Duration::days(7),
    /// );
    /// ledger.revoke(record).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn revoke(&self, record: RevocationRecord) -> Result<(), StoreError>;

    /// Remove records whose token expired at or before `now`
    ///
    /// Returns the number of records removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;
}
