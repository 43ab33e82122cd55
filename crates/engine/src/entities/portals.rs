//! Portals entity module.
//!
//! Wraps the portal store with the clock, so callers never pass "now" around.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use cortex_domain::{Portal, PortalId};

use crate::infrastructure::ports::{ClockPort, PortalRepo, RepoError};

/// Portals entity - handles portal record operations.
pub struct Portals {
    repo: Arc<dyn PortalRepo>,
    clock: Arc<dyn ClockPort>,
}

impl Portals {
    pub fn new(repo: Arc<dyn PortalRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Portals that have not expired yet. Expired records are purged first.
    ///
    /// Records the store returns past their expiry are dropped here as well.
    pub async fn active(&self) -> Result<Vec<Portal>, RepoError> {
        let now = self.clock.now();
        let mut portals = self.repo.list_active(now).await?;
        portals.retain(|portal| !portal.is_expired(now));
        Ok(portals)
    }

    /// Find a record linking two zones, in either direction.
    pub async fn find_between(&self, a: &str, b: &str) -> Result<Option<Portal>, RepoError> {
        self.repo.find_between(a, b).await
    }

    pub async fn save(&self, portal: &Portal) -> Result<(), RepoError> {
        self.repo.save(portal).await
    }

    pub async fn delete(&self, id: PortalId) -> Result<(), RepoError> {
        self.repo.delete(id).await
    }
}
