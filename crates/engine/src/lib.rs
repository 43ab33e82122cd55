//! Cortex engine library.
//!
//! Zone lookup and route planning over a prebuilt world graph.
//!
//! ## Structure
//!
//! - `cartography/` - Zone graph, name indexes, route solver and resolver
//! - `entities/` - Entity modules wrapping repository ports
//! - `use_cases/` - User story orchestration across entities and cartography
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod cartography;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for unit and integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
