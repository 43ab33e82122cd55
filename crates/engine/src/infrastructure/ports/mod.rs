//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions at the edge of the engine.
//! Ports exist for:
//! - Portal record storage (SQLite today, any document store tomorrow)
//! - Clock (for testing expiry)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::PortalRepo;
pub use testing::ClockPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::MockPortalRepo;

#[cfg(test)]
pub use testing::MockClockPort;
