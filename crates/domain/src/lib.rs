extern crate self as cortex_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::ZoneCatalog;
pub use entities::{Portal, Zone};
pub use error::DomainError;

// Re-export ID types
pub use ids::{ExitId, MapId, PortalId};

// Re-export value objects
pub use value_objects::{
    ExitTarget, PortalNode, Position, WorldExit, WorldZone, ZoneClassification,
};
