//! Build-time errors.
//!
//! Everything here is a configuration error: it aborts artifact construction
//! instead of producing a partial graph. Query-time misses never surface as errors.

use std::path::PathBuf;

use cortex_domain::DomainError;
use thiserror::Error;

use crate::infrastructure::artifacts::ArtifactError;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("World data unavailable at {path}: {source}")]
    WorldDataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed world data in {path}: {message}")]
    MalformedWorldData { path: PathBuf, message: String },

    #[error("Malformed shortcut list in {path}: {message}")]
    MalformedShortcuts { path: PathBuf, message: String },

    #[error("Invalid zone catalog: {0}")]
    Catalog(#[from] DomainError),

    /// A curated shortcut names a zone the catalog cannot place on the graph.
    #[error("Curated shortcut references unknown zone: {0}")]
    UnknownShortcutZone(String),

    #[error("Curated shortcut {from} -> {to} has invalid weight {weight}")]
    InvalidShortcutWeight { from: String, to: String, weight: f64 },

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl BuildError {
    pub fn malformed_world(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::MalformedWorldData {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed_shortcuts(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::MalformedShortcuts {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
