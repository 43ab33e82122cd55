//! Zone records produced by the world-data parser.
//!
//! The parser that reads the raw game dump lives outside this workspace; these
//! types are the boundary it writes to. They are consumed once, at build time.

use serde::{Deserialize, Serialize};

use crate::ids::{ExitId, MapId};
use crate::value_objects::{PortalNode, Position};

/// Classification string attached to each zone in the dump
/// (e.g. `"OPENPVP_BLACK_1"`, `"DUNGEON_ELITE"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneClassification(String);

impl ZoneClassification {
    /// Multiplier applied to crossing distances inside dungeon-type zones.
    pub const DUNGEON_PENALTY: f64 = 4.0;

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_dungeon(&self) -> bool {
        self.0.contains("DUNGEON")
    }

    /// Weight multiplier for walking between two exits of this zone.
    pub fn crossing_penalty(&self) -> f64 {
        if self.is_dungeon() {
            Self::DUNGEON_PENALTY
        } else {
            1.0
        }
    }
}

/// The exit on the far side of a structural connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitTarget {
    pub exit_id: ExitId,
    pub map_id: MapId,
}

impl ExitTarget {
    pub fn node(&self) -> PortalNode {
        PortalNode {
            map_id: self.map_id.clone(),
            exit_id: self.exit_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldExit {
    pub exit_id: ExitId,
    pub position: Position,
    /// Exits without a target are decorative and never enter the graph.
    #[serde(default)]
    pub target: Option<ExitTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldZone {
    pub display_name: String,
    pub map_id: MapId,
    #[serde(default)]
    pub classification: ZoneClassification,
    #[serde(default)]
    pub exits: Vec<WorldExit>,
}

impl WorldZone {
    /// Zones with digits in their name are instanced or internal clusters.
    pub fn is_internal(&self) -> bool {
        self.display_name.chars().any(|c| c.is_ascii_digit())
    }

    /// Exits that lead somewhere.
    pub fn linked_exits(&self) -> impl Iterator<Item = &WorldExit> {
        self.exits.iter().filter(|exit| exit.target.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_records() {
        let json = r#"{
            "displayName": "Scuttlesink Marsh",
            "mapId": "4204",
            "classification": "OPENPVP_RED",
            "exits": [
                {"exitId": "e1", "position": [10.0, 20.0], "target": {"exitId": "e9", "mapId": "4205"}},
                {"exitId": "e2", "position": [0.0, 0.0]}
            ]
        }"#;
        let zone: WorldZone = serde_json::from_str(json).expect("valid zone");
        assert_eq!(zone.display_name, "Scuttlesink Marsh");
        assert_eq!(zone.exits.len(), 2);
        assert_eq!(zone.linked_exits().count(), 1);
        assert_eq!(
            zone.exits[0].target.as_ref().map(ExitTarget::node),
            Some(PortalNode::new("e9", "4205"))
        );
    }

    #[test]
    fn dungeon_classification_carries_penalty() {
        assert_eq!(ZoneClassification::new("DUNGEON_SOLO").crossing_penalty(), 4.0);
        assert_eq!(ZoneClassification::new("OPENPVP_BLACK").crossing_penalty(), 1.0);
        assert_eq!(ZoneClassification::default().crossing_penalty(), 1.0);
    }

    #[test]
    fn names_with_digits_are_internal() {
        let zone = WorldZone {
            display_name: "Hideout 02".to_string(),
            map_id: MapId::new("x"),
            classification: ZoneClassification::default(),
            exits: vec![],
        };
        assert!(zone.is_internal());
    }
}
