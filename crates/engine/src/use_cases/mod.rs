//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules and cartography services.

pub mod location;
pub mod portals;
pub mod route;

pub use location::LocationUseCases;
pub use portals::PortalUseCases;
pub use route::RouteUseCases;
