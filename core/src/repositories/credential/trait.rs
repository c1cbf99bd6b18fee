//! Credential store trait defining the interface for per-subject refresh
//! token fingerprints.

use async_trait::async_trait;

use crate::domain::value_objects::Fingerprint;
use crate::errors::StoreError;

/// Result of a compare-and-set on the stored fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The stored value equalled the expected one and was replaced
    Swapped,
    /// The stored value differed; nothing was written
    Conflict,
}

impl CasOutcome {
    pub fn is_swapped(&self) -> bool {
        matches!(self, CasOutcome::Swapped)
    }
}

/// Per-subject storage of the single live refresh token fingerprint
///
/// # Consistency
/// `compare_and_set_fingerprint` must be atomic with respect to every other
/// write for the same subject. Two callers holding the same expected value
/// must never both observe `Swapped`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored fingerprint
    ///
    /// # Returns
    /// * `Ok(Some(Fingerprint))` - The subject has a live session
    /// * `Ok(None)` - Unknown subject or logged out
    /// * `Err(StoreError)` - The backing store failed
    async fn get_fingerprint(&self, subject: &str) -> Result<Option<Fingerprint>, StoreError>;

    /// Overwrite the stored fingerprint unconditionally
    ///
    /// Used at login, where any previous session is replaced.
    async fn set_fingerprint(&self, subject: &str, fingerprint: &Fingerprint) -> Result<(), StoreError>;

    /// Replace the stored fingerprint only if it still equals `expected`
    ///
    /// `new = None` clears the fingerprint.
    ///
    /// # Example
    /// ```no_run
    /// # use sw_core::domain::value_objects::Fingerprint;
    /// # use sw_core::repositories::{CasOutcome, CredentialStore};
    /// # async fn example(store: &impl CredentialStore) -> Result<(), Box<dyn std::error::Error>> {
    /// let current = store.get_fingerprint("user-1").await?.expect("session");
    /// let next = Fingerprint::compute("new.refresh.token");
    ///
    /// match store.compare_and_set_fingerprint("user-1", &current, Some(&next)).await? {
    ///     CasOutcome::Swapped => println!("rotated"),
    ///     CasOutcome::Conflict => println!("lost the race"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn compare_and_set_fingerprint(
        &self,
        subject: &str,
        expected: &Fingerprint,
        new: Option<&Fingerprint>,
    ) -> Result<CasOutcome, StoreError>;

    /// Remove the stored fingerprint unconditionally
    async fn clear_fingerprint(&self, subject: &str) -> Result<(), StoreError>;
}
