//! ZoneCatalog aggregate - the static registry of every zone in the world
//!
//! Built once from world data and immutable afterwards. Only the zone list is
//! serialized; the lookup tables are rebuilt when the catalog is loaded.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entities::Zone;
use crate::error::DomainError;
use crate::ids::MapId;
use crate::value_objects::{PortalNode, WorldZone};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Zone>", into = "Vec<Zone>")]
pub struct ZoneCatalog {
    zones: Vec<Zone>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<MapId, usize>,
    by_exit: HashMap<String, usize>,
}

impl ZoneCatalog {
    /// Build a catalog from zones in registration order.
    ///
    /// When a display name or exit id repeats, the earliest zone owns it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` if two zones share a map id.
    pub fn new(zones: Vec<Zone>) -> Result<Self, DomainError> {
        let mut by_name = HashMap::new();
        let mut by_id = HashMap::new();
        let mut by_exit = HashMap::new();

        for (idx, zone) in zones.iter().enumerate() {
            if by_id.insert(zone.map_id.clone(), idx).is_some() {
                return Err(DomainError::constraint(format!(
                    "duplicate map id {}",
                    zone.map_id
                )));
            }
            if !zone.display_name.is_empty() {
                by_name.entry(zone.display_name.clone()).or_insert(idx);
            }
            for exit in &zone.exit_ids {
                by_exit.entry(exit.as_str().to_string()).or_insert(idx);
            }
        }

        Ok(Self {
            zones,
            by_name,
            by_id,
            by_exit,
        })
    }

    pub fn from_world(records: &[WorldZone]) -> Result<Self, DomainError> {
        Self::new(records.iter().map(Zone::from).collect())
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn zone_by_name(&self, name: &str) -> Option<&Zone> {
        self.by_name.get(name).map(|&idx| &self.zones[idx])
    }

    pub fn zone_by_id(&self, map_id: &str) -> Option<&Zone> {
        self.by_id.get(map_id).map(|&idx| &self.zones[idx])
    }

    pub fn zone_of_exit(&self, exit_id: &str) -> Option<&Zone> {
        self.by_exit.get(exit_id).map(|&idx| &self.zones[idx])
    }

    /// Look a zone up by display name, falling back to map id.
    pub fn resolve(&self, name_or_id: &str) -> Option<&Zone> {
        self.zone_by_name(name_or_id)
            .or_else(|| self.zone_by_id(name_or_id))
    }

    /// Map id of a zone given its display name or one of its exit ids.
    pub fn map_id(&self, name_or_exit: &str) -> Option<&MapId> {
        self.zone_by_name(name_or_exit)
            .or_else(|| self.zone_of_exit(name_or_exit))
            .map(|zone| &zone.map_id)
    }

    /// Display name of a zone given its map id or one of its exit ids.
    pub fn map_name(&self, id_or_exit: &str) -> Option<&str> {
        self.zone_by_id(id_or_exit)
            .or_else(|| self.zone_of_exit(id_or_exit))
            .map(|zone| zone.display_name.as_str())
    }

    /// Graph node standing in for a zone named by display name or map id.
    pub fn representative_node(&self, name_or_id: &str) -> Option<PortalNode> {
        self.resolve(name_or_id).and_then(Zone::representative_node)
    }

    /// Distinct, non-empty display names in catalog order.
    pub fn display_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.zones
            .iter()
            .map(|zone| zone.display_name.as_str())
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .collect()
    }
}

impl TryFrom<Vec<Zone>> for ZoneCatalog {
    type Error = DomainError;

    fn try_from(zones: Vec<Zone>) -> Result<Self, Self::Error> {
        Self::new(zones)
    }
}

impl From<ZoneCatalog> for Vec<Zone> {
    fn from(catalog: ZoneCatalog) -> Self {
        catalog.zones
    }
}
