//! Travel time estimate use case.

use std::sync::Arc;
use std::time::Duration;

use crate::cartography::{PortalOverlay, RoutePlanner};

/// Estimates time on foot as a fixed cost per zone crossed on the static graph.
pub struct EstimateTravelTime {
    planner: Arc<dyn RoutePlanner>,
    seconds_per_map: u64,
}

impl EstimateTravelTime {
    pub fn new(planner: Arc<dyn RoutePlanner>, seconds_per_map: u64) -> Self {
        Self {
            planner,
            seconds_per_map,
        }
    }

    /// Time from `home` to `zone`.
    ///
    /// Zero when no home is known, `None` when the zone cannot be reached.
    pub fn execute(&self, zone: &str, home: Option<&str>) -> Option<Duration> {
        let Some(home) = home else {
            return Some(Duration::ZERO);
        };
        let path = self
            .planner
            .shortest_path(home, zone, &PortalOverlay::empty(), None);
        let crossings = u64::try_from(path.len().checked_sub(1)?).ok()?;
        Some(Duration::from_secs(crossings * self.seconds_per_map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartography::MockRoutePlanner;
    use crate::test_fixtures::fixture_solver;

    fn use_case() -> EstimateTravelTime {
        EstimateTravelTime::new(Arc::new(fixture_solver()), 60)
    }

    #[test]
    fn charges_per_zone_crossed() {
        assert_eq!(
            use_case().execute("Fort Sterling", Some("Scuttlesink Marsh")),
            Some(Duration::from_secs(120))
        );
    }

    #[test]
    fn home_zone_is_free() {
        assert_eq!(
            use_case().execute("Fort Sterling", Some("Fort Sterling")),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn no_home_means_zero() {
        assert_eq!(use_case().execute("Lymhurst", None), Some(Duration::ZERO));
    }

    #[test]
    fn unreachable_zone_has_no_estimate() {
        assert_eq!(use_case().execute("Lymhurst", Some("Scuttlesink Marsh")), None);
    }

    #[test]
    fn ignores_portals() {
        let mut planner = MockRoutePlanner::new();
        planner
            .expect_shortest_path()
            .withf(|_, _, overlay, max_hops| overlay.is_empty() && max_hops.is_none())
            .returning(|home, zone, _, _| vec![home.to_string(), zone.to_string()]);
        let use_case = EstimateTravelTime::new(Arc::new(planner), 45);

        assert_eq!(
            use_case.execute("Lymhurst", Some("Fort Sterling")),
            Some(Duration::from_secs(45))
        );
    }
}
