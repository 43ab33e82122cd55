//! Aggregate roots - domain objects that own their related data
//!
//! The zone catalog is the only aggregate: it owns every zone and the lookup
//! tables derived from them, and is never mutated after construction.

pub mod zone_catalog;

pub use zone_catalog::ZoneCatalog;
