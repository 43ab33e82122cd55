//! Plan route use case.
//!
//! Resolves both ends of a route from free text, then routes over the static
//! graph plus every portal that is still open.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cortex_domain::{Portal, ZoneCatalog};
use tracing::info;

use crate::cartography::{LocationResolver, PortalOverlay, RoutePlanner};
use crate::entities::Portals;
use crate::infrastructure::ports::RepoError;

/// One zone on a planned route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub zone: String,
    /// Expiry of the portal taken to arrive here, if the leg used one.
    pub portal_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub steps: Vec<RouteStep>,
}

impl PlannedRoute {
    fn new(zones: Vec<String>, portals: &[Portal]) -> Self {
        let mut steps: Vec<RouteStep> = Vec::with_capacity(zones.len());
        for zone in zones {
            let portal_expires_at = steps.last().and_then(|previous| {
                portals
                    .iter()
                    .find(|portal| portal.connects(&previous.zone, &zone))
                    .map(|portal| portal.expires_at)
            });
            steps.push(RouteStep {
                zone,
                portal_expires_at,
            });
        }
        Self { steps }
    }

    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.zone.as_str())
    }

    /// Legs that go through a portal.
    pub fn portal_legs(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.portal_expires_at.is_some())
            .count()
    }
}

impl fmt::Display for PlannedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            if idx > 0 {
                match step.portal_expires_at {
                    Some(expires_at) => write!(f, " =[until {}]=> ", expires_at.format("%H%M"))?,
                    None => f.write_str(" -> ")?,
                }
            }
            f.write_str(&step.zone)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// A query matched no zone.
    Unresolved { query: String },
    /// Both ends resolved but nothing connects them.
    Unreachable { from: String, to: String },
    Found(PlannedRoute),
}

#[derive(Debug, thiserror::Error)]
pub enum PlanRouteError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Plan route use case.
///
/// Orchestrates: name resolution, portal lookup, overlay construction, solving.
pub struct PlanRoute {
    resolver: Arc<LocationResolver>,
    planner: Arc<dyn RoutePlanner>,
    catalog: Arc<ZoneCatalog>,
    portals: Arc<Portals>,
}

impl PlanRoute {
    pub fn new(
        resolver: Arc<LocationResolver>,
        planner: Arc<dyn RoutePlanner>,
        catalog: Arc<ZoneCatalog>,
        portals: Arc<Portals>,
    ) -> Self {
        Self {
            resolver,
            planner,
            catalog,
            portals,
        }
    }

    pub async fn execute(
        &self,
        from: &str,
        to: &str,
        home: Option<&str>,
    ) -> Result<RouteOutcome, PlanRouteError> {
        let Some(start) = self.resolver.best_guess(from, home) else {
            return Ok(RouteOutcome::Unresolved {
                query: from.to_string(),
            });
        };
        let Some(end) = self.resolver.best_guess(to, home) else {
            return Ok(RouteOutcome::Unresolved {
                query: to.to_string(),
            });
        };

        let active = self.portals.active().await?;
        let overlay = PortalOverlay::from_portals(&self.catalog, &active);
        let zones = self.planner.shortest_path(&start, &end, &overlay, None);

        if zones.is_empty() {
            info!(from = %start, to = %end, portals = active.len(), "No route found");
            return Ok(RouteOutcome::Unreachable {
                from: start,
                to: end,
            });
        }

        let route = PlannedRoute::new(zones, &active);
        info!(
            from = %start,
            to = %end,
            zones = route.steps.len(),
            portal_legs = route.portal_legs(),
            "Planned route"
        );
        Ok(RouteOutcome::Found(route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPortalRepo;
    use crate::test_fixtures::{fixed_clock, fixture_cartography, portal};

    fn use_case(open_portals: Vec<Portal>) -> PlanRoute {
        let cartography = fixture_cartography();
        let mut repo = MockPortalRepo::new();
        repo.expect_list_active()
            .returning(move |_| Ok(open_portals.clone()));
        let portals = Portals::new(Arc::new(repo), Arc::new(fixed_clock()));
        PlanRoute::new(
            Arc::new(cartography.resolver()),
            Arc::new(cartography.solver()),
            cartography.catalog().clone(),
            Arc::new(portals),
        )
    }

    fn found(outcome: RouteOutcome) -> PlannedRoute {
        match outcome {
            RouteOutcome::Found(route) => route,
            other => panic!("expected a route, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn scuttlesink_to_shaleheath_steep() {
        let route = found(
            use_case(vec![])
                .execute("scuttlesink", "steep", None)
                .await
                .expect("plan"),
        );

        assert_eq!(
            route.zones().collect::<Vec<_>>(),
            vec!["Scuttlesink Marsh", "Shaleheath Steep"]
        );
        assert_eq!(route.portal_legs(), 0);
    }

    #[tokio::test]
    async fn routes_through_open_portals() {
        let open = vec![
            portal("Scuttlesink Marsh", "Qiient-Al-Nusom"),
            portal("Lymhurst", "Qiient-Al-Nusom"),
        ];
        let route = found(
            use_case(open)
                .execute("Scuttlesink Marsh", "lymhurst", None)
                .await
                .expect("plan"),
        );

        assert_eq!(
            route.zones().collect::<Vec<_>>(),
            vec!["Scuttlesink Marsh", "Qiient-Al-Nusom", "Lymhurst"]
        );
        assert_eq!(route.portal_legs(), 2);
        assert_eq!(route.steps[0].portal_expires_at, None);
        assert_eq!(
            route.to_string(),
            "Scuttlesink Marsh =[until 1930]=> Qiient-Al-Nusom =[until 1930]=> Lymhurst"
        );
    }

    #[tokio::test]
    async fn reports_unreachable_pairs() {
        let outcome = use_case(vec![])
            .execute("Scuttlesink Marsh", "Lymhurst", None)
            .await
            .expect("plan");

        assert_eq!(
            outcome,
            RouteOutcome::Unreachable {
                from: "Scuttlesink Marsh".to_string(),
                to: "Lymhurst".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn reports_the_query_that_matched_nothing() {
        let outcome = use_case(vec![])
            .execute("Scuttlesink Marsh", "zzz-nonexistent", None)
            .await
            .expect("plan");

        assert_eq!(
            outcome,
            RouteOutcome::Unresolved {
                query: "zzz-nonexistent".to_string()
            }
        );
    }

    #[tokio::test]
    async fn repo_failure_is_an_error() {
        let cartography = fixture_cartography();
        let mut repo = MockPortalRepo::new();
        repo.expect_list_active()
            .returning(|_| Err(RepoError::database("portals", "locked")));
        let plan = PlanRoute::new(
            Arc::new(cartography.resolver()),
            Arc::new(cartography.solver()),
            cartography.catalog().clone(),
            Arc::new(Portals::new(Arc::new(repo), Arc::new(fixed_clock()))),
        );

        let result = plan.execute("Scuttlesink Marsh", "steep", None).await;

        assert!(matches!(result, Err(PlanRouteError::Repo(_))));
    }
}
