//! Portal entity - a user-submitted, expiring shortcut between two zones
//!
//! Portals feed the transient overlay of the route solver. They are stored by
//! an external repository that purges expired records before every read.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::PortalId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portal {
    pub id: PortalId,
    /// Display name of one end. Direction is informational, travel is bidirectional.
    pub from_zone: String,
    pub to_zone: String,
    pub expires_at: DateTime<Utc>,
    /// Mention of the user who reported the portal.
    pub submitter: String,
    pub submitted_at: DateTime<Utc>,
}

impl Portal {
    /// Create a new portal record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - Either zone name is empty
    /// - Both ends name the same zone
    /// - The portal would already be expired at submission time
    pub fn new(
        from_zone: impl Into<String>,
        to_zone: impl Into<String>,
        expires_at: DateTime<Utc>,
        submitter: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let from_zone = from_zone.into();
        let to_zone = to_zone.into();
        if from_zone.trim().is_empty() || to_zone.trim().is_empty() {
            return Err(DomainError::validation("Portal zones cannot be empty"));
        }
        if from_zone == to_zone {
            return Err(DomainError::validation(format!(
                "Portal must connect two different zones, got {from_zone} twice"
            )));
        }
        if expires_at <= submitted_at {
            return Err(DomainError::validation("Portal expiry must be in the future"));
        }
        Ok(Self {
            id: PortalId::new(),
            from_zone,
            to_zone,
            expires_at,
            submitter: submitter.into(),
            submitted_at,
        })
    }

    /// Reconstruct a portal from storage
    pub fn from_storage(
        id: PortalId,
        from_zone: String,
        to_zone: String,
        expires_at: DateTime<Utc>,
        submitter: String,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            from_zone,
            to_zone,
            expires_at,
            submitter,
            submitted_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// True if this portal links `a` and `b`, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from_zone == a && self.to_zone == b) || (self.from_zone == b && self.to_zone == a)
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (until {})",
            self.from_zone,
            self.to_zone,
            self.expires_at.format("%H%M %d/%m/%y")
        )
    }
}
