//! List open portals.

use std::sync::Arc;

use cortex_domain::Portal;

use crate::entities::Portals;
use crate::infrastructure::ports::RepoError;

pub struct ListPortals {
    portals: Arc<Portals>,
}

impl ListPortals {
    pub fn new(portals: Arc<Portals>) -> Self {
        Self { portals }
    }

    /// Open portals, soonest to expire first.
    pub async fn execute(&self) -> Result<Vec<Portal>, RepoError> {
        let mut portals = self.portals.active().await?;
        portals.sort_by_key(|portal| portal.expires_at);
        Ok(portals)
    }
}
