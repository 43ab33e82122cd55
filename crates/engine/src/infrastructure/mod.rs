//! Infrastructure implementations.
//!
//! Contains port trait implementations and the readers and writers for the
//! offline build inputs and outputs.

pub mod artifacts;
pub mod clock;
pub mod config;
pub mod portal_store;
pub mod ports;
pub mod world_data;
