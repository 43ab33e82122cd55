//! Repository port traits for database access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cortex_domain::{Portal, PortalId};

use super::error::RepoError;

// =============================================================================
// Portal Records
// =============================================================================

/// Store of user-submitted, expiring portal records.
///
/// Expired records are the store's responsibility: `list_active` purges them
/// before it reads, so callers never see a stale portal. Purging twice is
/// harmless, so concurrent callers need no extra coordination.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalRepo: Send + Sync {
    /// Delete every record that expired before `now`, returning how many were removed.
    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<u64, RepoError>;

    /// Purge expired records, then return the remaining ones ordered by expiry.
    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Portal>, RepoError>;

    /// Find a record linking two zones, trying `a -> b` before `b -> a`.
    async fn find_between(&self, a: &str, b: &str) -> Result<Option<Portal>, RepoError>;

    async fn save(&self, portal: &Portal) -> Result<(), RepoError>;

    async fn delete(&self, id: PortalId) -> Result<(), RepoError>;
}
