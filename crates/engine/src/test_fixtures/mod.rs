//! Test fixtures loader for JSON fixture files and common test helpers.
//!
//! The fixture world lives in `test_data/world/` and is small enough to
//! reason about by hand:
//!
//! ```text
//! Scuttlesink Marsh --- Shaleheath Steep --- Whitebank Descent --- Whitebank Abyss
//!         \                  /                  (dungeon)              (dungeon)
//!          Shaleheath Hills ---- Fort Sterling ==== Fort Sterling Portal
//!
//! Lymhurst ==== Lymhurst Portal            (isolated pair)
//! Qiient-Al-Nusom, Qiient-Al-Tersas, Quaent-Al-Tersis   (open-world roads, no exits)
//! Gulfspire Reach                           (no exits, no representative node)
//! Hideout 02                                (internal, skipped by the graph)
//! ```
//!
//! `====` marks a curated shortcut.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};
use cortex_domain::{Portal, PortalNode, WorldZone, ZoneCatalog};

use crate::cartography::{
    Cartography, CuratedShortcut, LocationResolver, NameIndex, RouteSolver,
};
use crate::infrastructure::ports::MockClockPort;
use crate::infrastructure::world_data::WorldSource;

// =============================================================================
// Fixture Loading
// =============================================================================

fn fixture_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path)
}

/// Load a JSON fixture from test_data/ directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = fixture_path(path);
    let content = std::fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture '{}': {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture '{}': {}",
            fixture_path.display(),
            e
        )
    })
}

// =============================================================================
// World Fixtures
// =============================================================================

pub fn fixture_world() -> Vec<WorldZone> {
    load_fixture("world/zones.json")
}

pub fn fixture_shortcuts() -> Vec<CuratedShortcut> {
    load_fixture("world/shortcuts.json")
}

pub fn fixture_catalog() -> ZoneCatalog {
    ZoneCatalog::from_world(&fixture_world()).expect("fixture catalog")
}

pub fn fixture_cartography() -> Cartography {
    Cartography::build(&fixture_world(), &fixture_shortcuts()).expect("fixture cartography")
}

pub fn fixture_solver() -> RouteSolver {
    fixture_cartography().solver()
}

pub fn fixture_names() -> NameIndex {
    NameIndex::build(&fixture_catalog())
}

pub fn fixture_resolver() -> LocationResolver {
    fixture_cartography().resolver()
}

/// Copy the fixture inputs into `dir` and point a source at the copies.
pub fn write_world(dir: &Path) -> WorldSource {
    let world = dir.join("zones.json");
    let shortcuts = dir.join("shortcuts.json");
    std::fs::copy(fixture_path("world/zones.json"), &world).expect("copy world data");
    std::fs::copy(fixture_path("world/shortcuts.json"), &shortcuts).expect("copy shortcuts");
    WorldSource::new(world).with_shortcuts(shortcuts)
}

// =============================================================================
// Small Builders
// =============================================================================

pub fn node(exit_id: &str, map_id: &str) -> PortalNode {
    PortalNode::new(exit_id, map_id)
}

/// 18:30 UTC on 14 March 2025.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// A clock stuck at `fixed_now()`.
pub fn fixed_clock() -> MockClockPort {
    let mut clock = MockClockPort::new();
    clock.expect_now().returning(fixed_now);
    clock
}

/// A portal submitted at `fixed_now()` that stays open for an hour.
pub fn portal(from: &str, to: &str) -> Portal {
    Portal::new(from, to, fixed_now() + Duration::hours(1), "@scout", fixed_now())
        .expect("valid portal")
}
