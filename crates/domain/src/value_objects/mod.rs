//! Value objects - Immutable objects defined by their attributes

mod portal_node;
mod position;
mod world_data;

pub use portal_node::PortalNode;
pub use position::Position;
pub use world_data::{ExitTarget, WorldExit, WorldZone, ZoneClassification};
