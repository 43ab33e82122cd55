//! Readers for the offline inputs: the world data dump and the shortcut list.

use std::fs;
use std::path::{Path, PathBuf};

use cortex_domain::WorldZone;
use tracing::info;

use crate::cartography::{BuildError, CuratedShortcut};

/// Where the world data and optional shortcut list live.
#[derive(Debug, Clone)]
pub struct WorldSource {
    pub world_path: PathBuf,
    /// When unset the built-in city shortcuts apply.
    pub shortcuts_path: Option<PathBuf>,
}

impl WorldSource {
    pub fn new(world_path: impl Into<PathBuf>) -> Self {
        Self {
            world_path: world_path.into(),
            shortcuts_path: None,
        }
    }

    pub fn with_shortcuts(mut self, path: impl Into<PathBuf>) -> Self {
        self.shortcuts_path = Some(path.into());
        self
    }

    /// Read the zone list, a JSON array of zone records.
    pub fn load_zones(&self) -> Result<Vec<WorldZone>, BuildError> {
        let raw = read(&self.world_path)?;
        let zones: Vec<WorldZone> = serde_json::from_str(&raw)
            .map_err(|e| BuildError::malformed_world(&self.world_path, e))?;
        info!(path = %self.world_path.display(), zones = zones.len(), "Loaded world data");
        Ok(zones)
    }

    /// Read the shortcut list, a JSON array of `[from, to, weight]` triples.
    pub fn load_shortcuts(&self) -> Result<Vec<CuratedShortcut>, BuildError> {
        let Some(path) = &self.shortcuts_path else {
            return Ok(CuratedShortcut::defaults());
        };
        let raw = read(path)?;
        let shortcuts: Vec<CuratedShortcut> =
            serde_json::from_str(&raw).map_err(|e| BuildError::malformed_shortcuts(path, e))?;
        info!(path = %path.display(), shortcuts = shortcuts.len(), "Loaded curated shortcuts");
        Ok(shortcuts)
    }
}

fn read(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::WorldDataUnavailable {
        path: path.to_path_buf(),
        source,
    })
}
