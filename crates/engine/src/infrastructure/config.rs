//! Engine configuration read from the environment.

use std::path::PathBuf;

use super::artifacts::ArtifactStore;
use super::world_data::WorldSource;

/// Estimated seconds to cross one zone on foot.
pub const DEFAULT_SECONDS_PER_MAP: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub world_data_path: PathBuf,
    pub shortcuts_path: Option<PathBuf>,
    pub artifact_dir: PathBuf,
    pub portal_db_path: String,
    pub seconds_per_map: u64,
    /// Home zone used when a command does not name one.
    pub home_zone: Option<String>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let seconds_per_map = match get("CORTEX_SECONDS_PER_MAP") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid CORTEX_SECONDS_PER_MAP, using default");
                DEFAULT_SECONDS_PER_MAP
            }),
            None => DEFAULT_SECONDS_PER_MAP,
        };

        Self {
            world_data_path: get("CORTEX_WORLD_DATA")
                .unwrap_or_else(|| "data/world.json".into())
                .into(),
            shortcuts_path: get("CORTEX_SHORTCUTS").map(PathBuf::from),
            artifact_dir: get("CORTEX_ARTIFACT_DIR")
                .unwrap_or_else(|| "bin-dumps".into())
                .into(),
            portal_db_path: get("CORTEX_PORTAL_DB").unwrap_or_else(|| "portals.db".into()),
            seconds_per_map,
            home_zone: get("CORTEX_HOME_ZONE"),
        }
    }

    pub fn world_source(&self) -> WorldSource {
        let source = WorldSource::new(&self.world_data_path);
        match &self.shortcuts_path {
            Some(path) => source.with_shortcuts(path),
            None => source,
        }
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.artifact_dir)
    }
}
