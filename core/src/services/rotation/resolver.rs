//! Lookup of the current principal for a subject

use async_trait::async_trait;

use crate::domain::entities::claims::Principal;
use crate::errors::DomainResult;

/// Supplies email and role for a subject at refresh time
///
/// Refresh tokens carry only the subject, so the access token minted by a
/// rotation would otherwise lose them. Returning `Ok(None)` falls back to a
/// subject-only access token.
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    async fn resolve(&self, subject: &str) -> DomainResult<Option<Principal>>;
}
