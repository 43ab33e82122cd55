//! Binary artifacts produced by the offline build.
//!
//! Each artifact is one bincode blob wrapped in a versioned envelope. Writes go
//! to a sibling temp file that is renamed into place, so a reader never sees a
//! half-written file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Bumped whenever the layout of any artifact changes.
pub const ARTIFACT_VERSION: u32 = 1;

pub const ZONES_ARTIFACT: &str = "zones.bin";
pub const TOPOLOGY_ARTIFACT: &str = "topology.bin";
pub const NAMES_ARTIFACT: &str = "names.bin";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Artifact encoding failed: {0}")]
    Encode(#[from] bincode::Error),
}

impl ArtifactError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    payload: T,
}

/// Directory holding the build artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Encode a value exactly as it is written to disk.
    pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ArtifactError> {
        Ok(bincode::serialize(&EnvelopeRef {
            version: ARTIFACT_VERSION,
            payload: value,
        })?)
    }

    /// Read an artifact.
    ///
    /// Returns `Ok(None)` when the file is missing, undecodable, or from
    /// another artifact version; callers rebuild in all three cases.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ArtifactError> {
        let path = self.path(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ArtifactError::io(&path, e)),
        };

        match bincode::deserialize::<Envelope<T>>(&bytes) {
            Ok(envelope) if envelope.version == ARTIFACT_VERSION => Ok(Some(envelope.payload)),
            Ok(envelope) => {
                warn!(
                    path = %path.display(),
                    found = envelope.version,
                    expected = ARTIFACT_VERSION,
                    "Ignoring artifact from another version"
                );
                Ok(None)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt artifact");
                Ok(None)
            }
        }
    }

    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), ArtifactError> {
        fs::create_dir_all(&self.dir).map_err(|e| ArtifactError::io(&self.dir, e))?;

        let bytes = Self::encode(value)?;
        let path = self.path(name);
        let tmp = self.path(&format!("{name}.tmp"));

        let mut file = fs::File::create(&tmp).map_err(|e| ArtifactError::io(&tmp, e))?;
        file.write_all(&bytes)
            .and_then(|()| file.sync_all())
            .map_err(|e| ArtifactError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| ArtifactError::io(&path, e))?;

        info!(path = %path.display(), bytes = bytes.len(), "Wrote artifact");
        Ok(())
    }
}
