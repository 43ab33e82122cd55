//! Shortest-route search over the static graph plus a portal overlay.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use cortex_domain::{MapId, PortalNode, ZoneCatalog};
use tracing::trace;

use super::overlay::PortalOverlay;
use super::topology::TopologyGraph;

/// Anything that can turn two zone names into the zones travelled between them.
#[cfg_attr(test, mockall::automock)]
pub trait RoutePlanner: Send + Sync {
    /// Display names of the zones visited from `start` to `end`, inclusive.
    ///
    /// Empty when either zone is unknown or no path exists within `max_hops`.
    fn shortest_path(
        &self,
        start: &str,
        end: &str,
        overlay: &PortalOverlay,
        max_hops: Option<usize>,
    ) -> Vec<String>;
}

/// A found route.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedPath {
    /// Nodes walked, first to last. Empty when start and end are the same zone.
    pub nodes: Vec<PortalNode>,
    /// Zone names along the path with consecutive repeats collapsed.
    pub zones: Vec<String>,
    pub cost: f64,
}

/// Heap entry. Reversed ordering turns `BinaryHeap` into a min-heap on cost,
/// with insertion order breaking ties.
struct Frontier<'a> {
    cost: f64,
    seq: u64,
    hops: usize,
    node: &'a PortalNode,
    parent: Option<&'a PortalNode>,
}

impl PartialEq for Frontier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier<'_> {}

impl PartialOrd for Frontier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Dijkstra from every node of the start zone to the first settled node of the
/// end zone.
#[derive(Clone)]
pub struct RouteSolver {
    catalog: Arc<ZoneCatalog>,
    graph: Arc<TopologyGraph>,
}

impl RouteSolver {
    pub fn new(catalog: Arc<ZoneCatalog>, graph: Arc<TopologyGraph>) -> Self {
        Self { catalog, graph }
    }

    /// Find the cheapest path between two zones, each named by display name
    /// or map id.
    ///
    /// `max_hops` bounds the number of nodes on the path; a node whose path
    /// already holds that many is not expanded.
    pub fn solve(
        &self,
        start: &str,
        end: &str,
        overlay: &PortalOverlay,
        max_hops: Option<usize>,
    ) -> Option<SolvedPath> {
        let start_id = &self.catalog.resolve(start)?.map_id;
        let end_id = &self.catalog.resolve(end)?.map_id;

        if start_id == end_id {
            return Some(SolvedPath {
                nodes: Vec::new(),
                zones: vec![self.zone_name(start_id)],
                cost: 0.0,
            });
        }

        let (nodes, cost) = self.search(start_id, end_id, overlay, max_hops)?;
        let zones = self.zone_names(&nodes);
        trace!(start, end, cost, hops = nodes.len(), "Solved route");
        Some(SolvedPath { nodes, zones, cost })
    }

    fn search(
        &self,
        start: &MapId,
        end: &MapId,
        overlay: &PortalOverlay,
        max_hops: Option<usize>,
    ) -> Option<(Vec<PortalNode>, f64)> {
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        for node in self
            .graph
            .nodes_in_zone(start)
            .chain(overlay.nodes_in_zone(start))
        {
            heap.push(Frontier {
                cost: 0.0,
                seq,
                hops: 1,
                node,
                parent: None,
            });
            seq += 1;
        }

        let mut settled: HashMap<&PortalNode, Option<&PortalNode>> = HashMap::new();

        while let Some(Frontier {
            cost,
            hops,
            node,
            parent,
            ..
        }) = heap.pop()
        {
            if settled.contains_key(node) {
                continue;
            }
            settled.insert(node, parent);

            if node.in_zone(end) {
                return Some((Self::trace_back(node, &settled), cost));
            }
            if max_hops.is_some_and(|limit| hops >= limit) {
                continue;
            }

            let graph_edges = self.graph.neighbors(node);
            let overlay_edges = overlay.neighbors(node).map(|next| (next, 0.0));
            for (next, weight) in graph_edges.chain(overlay_edges) {
                if settled.contains_key(next) {
                    continue;
                }
                heap.push(Frontier {
                    cost: cost + weight,
                    seq,
                    hops: hops + 1,
                    node: next,
                    parent: Some(node),
                });
                seq += 1;
            }
        }

        None
    }

    fn trace_back(
        last: &PortalNode,
        settled: &HashMap<&PortalNode, Option<&PortalNode>>,
    ) -> Vec<PortalNode> {
        let mut path = vec![last.clone()];
        let mut cursor = settled.get(last).copied().flatten();
        while let Some(node) = cursor {
            path.push(node.clone());
            cursor = settled.get(node).copied().flatten();
        }
        path.reverse();
        path
    }

    fn zone_names(&self, nodes: &[PortalNode]) -> Vec<String> {
        let mut names: Vec<String> = nodes
            .iter()
            .map(|node| self.zone_name(&node.map_id))
            .collect();
        names.dedup();
        names
    }

    /// Display name for a map id, or the id itself when the zone is unnamed.
    fn zone_name(&self, map_id: &MapId) -> String {
        self.catalog
            .zone_by_id(map_id.as_str())
            .map(|zone| zone.display_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(map_id.as_str())
            .to_string()
    }
}

impl RoutePlanner for RouteSolver {
    fn shortest_path(
        &self,
        start: &str,
        end: &str,
        overlay: &PortalOverlay,
        max_hops: Option<usize>,
    ) -> Vec<String> {
        self.solve(start, end, overlay, max_hops)
            .map(|path| path.zones)
            .unwrap_or_default()
    }
}
