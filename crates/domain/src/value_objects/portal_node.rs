use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{ExitId, MapId};

/// A graph node: one exit point as experienced from one zone.
///
/// The same physical exit pair shows up as two nodes, one per connected zone.
/// Field order matters: the derived ordering sorts by zone first, so all
/// nodes of one zone form a contiguous range in an ordered map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortalNode {
    pub map_id: MapId,
    pub exit_id: ExitId,
}

impl PortalNode {
    pub fn new(exit_id: impl Into<ExitId>, map_id: impl Into<MapId>) -> Self {
        Self {
            map_id: map_id.into(),
            exit_id: exit_id.into(),
        }
    }

    /// Synthetic node for an open-world zone that has no exits of its own.
    pub fn roads(map_id: MapId) -> Self {
        Self {
            map_id,
            exit_id: ExitId::roads(),
        }
    }

    /// Smallest possible node of a zone, used as a range start.
    pub fn zone_floor(map_id: &MapId) -> Self {
        Self {
            map_id: map_id.clone(),
            exit_id: ExitId::new(String::new()),
        }
    }

    pub fn in_zone(&self, map_id: &MapId) -> bool {
        &self.map_id == map_id
    }
}

impl fmt::Display for PortalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.exit_id, self.map_id)
    }
}
