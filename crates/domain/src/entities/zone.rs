//! Zone entity - a named game map with its structural exits

use serde::{Deserialize, Serialize};

use crate::ids::{ExitId, MapId};
use crate::value_objects::{PortalNode, WorldZone};

/// A named location in the game world.
///
/// Identity is the `map_id`; the display name is what users type and is
/// usually, but not always, unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub display_name: String,
    pub map_id: MapId,
    /// Every exit listed for the zone, in dump order.
    pub exit_ids: Vec<ExitId>,
}

impl Zone {
    pub fn new(display_name: impl Into<String>, map_id: impl Into<MapId>) -> Self {
        Self {
            display_name: display_name.into(),
            map_id: map_id.into(),
            exit_ids: Vec::new(),
        }
    }

    pub fn with_exits<I, E>(mut self, exits: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<ExitId>,
    {
        self.exit_ids = exits.into_iter().map(Into::into).collect();
        self
    }

    /// Open-world roads have no exits and a hyphenated name (`Qiient-Al-Nusom`).
    pub fn is_open_world(&self) -> bool {
        self.exit_ids.is_empty() && self.display_name.contains('-')
    }

    /// The node that stands in for this whole zone when only its name is known.
    pub fn representative_node(&self) -> Option<PortalNode> {
        if self.is_open_world() {
            return Some(PortalNode::roads(self.map_id.clone()));
        }
        self.exit_ids
            .first()
            .map(|exit| PortalNode::new(exit.clone(), self.map_id.clone()))
    }
}

impl From<&WorldZone> for Zone {
    fn from(record: &WorldZone) -> Self {
        Self {
            display_name: record.display_name.clone(),
            map_id: record.map_id.clone(),
            exit_ids: record.exits.iter().map(|e| e.exit_id.clone()).collect(),
        }
    }
}
