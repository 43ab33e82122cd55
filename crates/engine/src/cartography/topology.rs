//! Static topology graph and its builder.
//!
//! Nodes are exit points as seen from one zone. Edges are either jumps through
//! a linked exit pair (free), walks between two exits of the same zone (their
//! distance, scaled up inside dungeons), or curated city shortcuts.

use std::collections::BTreeMap;

use cortex_domain::{MapId, PortalNode, WorldZone, ZoneCatalog};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::BuildError;

/// A hand-maintained link between two zones the world data does not connect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, String, f64)", into = "(String, String, f64)")]
pub struct CuratedShortcut {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl CuratedShortcut {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Each royal city is linked to its portal town at no cost.
    pub fn defaults() -> Vec<Self> {
        ["Fort Sterling", "Lymhurst", "Bridgewatch", "Martlock", "Thetford"]
            .into_iter()
            .map(|city| Self::new(city, format!("{city} Portal"), 0.0))
            .collect()
    }
}

impl From<(String, String, f64)> for CuratedShortcut {
    fn from((from, to, weight): (String, String, f64)) -> Self {
        Self { from, to, weight }
    }
}

impl From<CuratedShortcut> for (String, String, f64) {
    fn from(shortcut: CuratedShortcut) -> Self {
        (shortcut.from, shortcut.to, shortcut.weight)
    }
}

/// Weighted, symmetric adjacency between portal nodes.
///
/// Ordered maps keep iteration, and therefore serialized artifacts,
/// independent of hashing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyGraph {
    adjacency: BTreeMap<PortalNode, BTreeMap<PortalNode, f64>>,
}

impl TopologyGraph {
    /// Build the graph from world data.
    ///
    /// Zones with digits in their name are skipped, and so are exits without
    /// a target. A later edge between the same pair of nodes overwrites an
    /// earlier one.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::UnknownShortcutZone` if a shortcut names a zone the
    /// catalog does not know or cannot represent by a node.
    pub fn build(
        catalog: &ZoneCatalog,
        world: &[WorldZone],
        shortcuts: &[CuratedShortcut],
    ) -> Result<Self, BuildError> {
        let mut graph = Self::default();

        for zone in world.iter().filter(|zone| !zone.is_internal()) {
            let linked: Vec<_> = zone.linked_exits().collect();

            for exit in &linked {
                if let Some(target) = &exit.target {
                    let node = PortalNode::new(exit.exit_id.clone(), zone.map_id.clone());
                    graph.connect(node, target.node(), 0.0);
                }
            }

            let penalty = zone.classification.crossing_penalty();
            for (i, a) in linked.iter().enumerate() {
                for b in &linked[i + 1..] {
                    let weight = a.position.distance_to(&b.position) * penalty;
                    graph.connect(
                        PortalNode::new(a.exit_id.clone(), zone.map_id.clone()),
                        PortalNode::new(b.exit_id.clone(), zone.map_id.clone()),
                        weight,
                    );
                }
            }
        }

        for shortcut in shortcuts {
            if shortcut.weight.is_nan() || shortcut.weight < 0.0 {
                return Err(BuildError::InvalidShortcutWeight {
                    from: shortcut.from.clone(),
                    to: shortcut.to.clone(),
                    weight: shortcut.weight,
                });
            }
            let from = Self::shortcut_node(catalog, &shortcut.from)?;
            let to = Self::shortcut_node(catalog, &shortcut.to)?;
            graph.connect(from, to, shortcut.weight);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built topology graph"
        );
        Ok(graph)
    }

    fn shortcut_node(catalog: &ZoneCatalog, zone: &str) -> Result<PortalNode, BuildError> {
        catalog
            .representative_node(zone)
            .ok_or_else(|| BuildError::UnknownShortcutZone(zone.to_string()))
    }

    /// Insert an undirected edge.
    pub fn connect(&mut self, a: PortalNode, b: PortalNode, weight: f64) {
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone(), weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
    }

    pub fn neighbors<'a>(
        &'a self,
        node: &PortalNode,
    ) -> impl Iterator<Item = (&'a PortalNode, f64)> + 'a {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(next, weight)| (next, *weight)))
    }

    /// Every node of the graph that belongs to `map_id`, in node order.
    pub fn nodes_in_zone(&self, map_id: &MapId) -> impl Iterator<Item = &PortalNode> + '_ {
        let map_id = map_id.clone();
        self.adjacency
            .range(PortalNode::zone_floor(&map_id)..)
            .map(|(node, _)| node)
            .take_while(move |node| node.in_zone(&map_id))
    }

    pub fn weight(&self, a: &PortalNode, b: &PortalNode) -> Option<f64> {
        self.adjacency.get(a).and_then(|edges| edges.get(b)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Undirected edge count; each edge is stored once per direction.
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.adjacency.values().map(BTreeMap::len).sum();
        let loops = self
            .adjacency
            .iter()
            .filter(|(node, edges)| edges.contains_key(*node))
            .count();
        (directed + loops) / 2
    }
}
