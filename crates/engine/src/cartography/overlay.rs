//! Transient portal links layered over the static graph for one query.

use std::collections::{BTreeMap, BTreeSet};

use cortex_domain::{MapId, Portal, PortalNode, ZoneCatalog};
use tracing::warn;

/// Zero-cost, undirected edges between representative nodes.
///
/// Built fresh for every route query and dropped afterwards. The static graph
/// is never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortalOverlay {
    edges: BTreeMap<PortalNode, BTreeSet<PortalNode>>,
}

impl PortalOverlay {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overlay every portal whose ends the catalog can place on the graph.
    pub fn from_portals(catalog: &ZoneCatalog, portals: &[Portal]) -> Self {
        let mut overlay = Self::empty();
        for portal in portals {
            let from = catalog.representative_node(&portal.from_zone);
            let to = catalog.representative_node(&portal.to_zone);
            match (from, to) {
                (Some(from), Some(to)) => overlay.link(from, to),
                _ => warn!(
                    portal_id = %portal.id,
                    from = %portal.from_zone,
                    to = %portal.to_zone,
                    "Skipping portal with an unplaceable zone"
                ),
            }
        }
        overlay
    }

    pub fn link(&mut self, a: PortalNode, b: PortalNode) {
        self.edges.entry(a.clone()).or_default().insert(b.clone());
        self.edges.entry(b).or_default().insert(a);
    }

    pub fn neighbors<'a>(&'a self, node: &PortalNode) -> impl Iterator<Item = &'a PortalNode> + 'a {
        self.edges.get(node).into_iter().flatten()
    }

    pub fn nodes_in_zone(&self, map_id: &MapId) -> impl Iterator<Item = &PortalNode> + '_ {
        let map_id = map_id.clone();
        self.edges
            .range(PortalNode::zone_floor(&map_id)..)
            .map(|(node, _)| node)
            .take_while(move |node| node.in_zone(&map_id))
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum::<usize>() / 2
    }
}
