//! World cartography: the static zone graph, name indexes, and the services
//! that query them.
//!
//! Everything here is built offline from world data, persisted as artifacts,
//! and immutable once loaded. Per-query state (the portal overlay) is created
//! by callers and never stored.

mod error;
pub mod name_index;
pub mod overlay;
pub mod resolver;
pub mod route;
pub mod topology;

pub use error::BuildError;
pub use name_index::{AbbreviationCache, NameIndex, SubstringIndex};
pub use overlay::PortalOverlay;
pub use resolver::LocationResolver;
pub use route::{RoutePlanner, RouteSolver, SolvedPath};
pub use topology::{CuratedShortcut, TopologyGraph};

#[cfg(test)]
pub use route::MockRoutePlanner;

use std::sync::Arc;

use cortex_domain::{Portal, WorldZone, ZoneCatalog};
use tracing::info;

use crate::infrastructure::artifacts::{
    ArtifactError, ArtifactStore, NAMES_ARTIFACT, TOPOLOGY_ARTIFACT, ZONES_ARTIFACT,
};
use crate::infrastructure::world_data::WorldSource;

/// The three build artifacts, loaded and shared.
#[derive(Clone)]
pub struct Cartography {
    catalog: Arc<ZoneCatalog>,
    graph: Arc<TopologyGraph>,
    names: Arc<NameIndex>,
}

impl Cartography {
    pub fn new(catalog: ZoneCatalog, graph: TopologyGraph, names: NameIndex) -> Self {
        Self {
            catalog: Arc::new(catalog),
            graph: Arc::new(graph),
            names: Arc::new(names),
        }
    }

    /// Build everything from raw world data.
    pub fn build(world: &[WorldZone], shortcuts: &[CuratedShortcut]) -> Result<Self, BuildError> {
        let catalog = ZoneCatalog::from_world(world)?;
        let graph = TopologyGraph::build(&catalog, world, shortcuts)?;
        let names = NameIndex::build(&catalog);
        Ok(Self::new(catalog, graph, names))
    }

    /// Load the persisted artifacts, or rebuild all of them from world data.
    ///
    /// The three artifacts are only used as a set: if any one is missing,
    /// corrupt or from another version, every artifact is rebuilt so a fresh
    /// catalog is never paired with a stale graph.
    pub fn load_or_build(store: &ArtifactStore, source: &WorldSource) -> Result<Self, BuildError> {
        let cartography = match Self::load(store)? {
            Some(loaded) => loaded,
            None => {
                info!(dir = %store.dir().display(), "Rebuilding artifacts");
                Self::rebuild(store, source)?
            }
        };

        info!(
            zones = cartography.catalog.len(),
            nodes = cartography.graph.node_count(),
            edges = cartography.graph.edge_count(),
            "Cartography ready"
        );
        Ok(cartography)
    }

    fn load(store: &ArtifactStore) -> Result<Option<Self>, ArtifactError> {
        let catalog = store.load::<ZoneCatalog>(ZONES_ARTIFACT)?;
        let graph = store.load::<TopologyGraph>(TOPOLOGY_ARTIFACT)?;
        let names = store.load::<NameIndex>(NAMES_ARTIFACT)?;

        match (catalog, graph, names) {
            (Some(catalog), Some(graph), Some(names)) => Ok(Some(Self::new(catalog, graph, names))),
            _ => Ok(None),
        }
    }

    /// Build from world data and overwrite every artifact.
    pub fn rebuild(store: &ArtifactStore, source: &WorldSource) -> Result<Self, BuildError> {
        let world = source.load_zones()?;
        let shortcuts = source.load_shortcuts()?;
        let built = Self::build(&world, &shortcuts)?;

        store.save(ZONES_ARTIFACT, built.catalog.as_ref())?;
        store.save(TOPOLOGY_ARTIFACT, built.graph.as_ref())?;
        store.save(NAMES_ARTIFACT, built.names.as_ref())?;
        Ok(built)
    }

    pub fn catalog(&self) -> &Arc<ZoneCatalog> {
        &self.catalog
    }

    pub fn graph(&self) -> &Arc<TopologyGraph> {
        &self.graph
    }

    pub fn names(&self) -> &Arc<NameIndex> {
        &self.names
    }

    pub fn solver(&self) -> RouteSolver {
        RouteSolver::new(self.catalog.clone(), self.graph.clone())
    }

    pub fn resolver(&self) -> LocationResolver {
        LocationResolver::new(self.names.clone(), Arc::new(self.solver()))
    }

    pub fn overlay(&self, portals: &[Portal]) -> PortalOverlay {
        PortalOverlay::from_portals(&self.catalog, portals)
    }
}
