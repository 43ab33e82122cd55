//! Application state and composition.

use std::sync::Arc;

use crate::cartography::{Cartography, RoutePlanner};
use crate::entities::Portals;
use crate::infrastructure::ports::{ClockPort, PortalRepo};
use crate::use_cases;
use crate::use_cases::location::{EstimateTravelTime, GuessLocation};
use crate::use_cases::portals::{ListPortals, SubmitPortal};
use crate::use_cases::route::PlanRoute;

/// Main application state.
///
/// Holds the loaded cartography, the portal entity, and every use case.
pub struct App {
    pub cartography: Arc<Cartography>,
    pub portals: Arc<Portals>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub location: use_cases::LocationUseCases,
    pub route: use_cases::RouteUseCases,
    pub portals: use_cases::PortalUseCases,
}

impl App {
    pub fn new(
        cartography: Arc<Cartography>,
        portal_repo: Arc<dyn PortalRepo>,
        clock: Arc<dyn ClockPort>,
        seconds_per_map: u64,
    ) -> Self {
        let portals = Arc::new(Portals::new(portal_repo, clock));
        let planner: Arc<dyn RoutePlanner> = Arc::new(cartography.solver());
        let resolver = Arc::new(cartography.resolver());

        let location = use_cases::LocationUseCases::new(
            Arc::new(GuessLocation::new(resolver.clone())),
            Arc::new(EstimateTravelTime::new(planner.clone(), seconds_per_map)),
        );
        let route = use_cases::RouteUseCases::new(Arc::new(PlanRoute::new(
            resolver.clone(),
            planner,
            cartography.catalog().clone(),
            portals.clone(),
        )));
        let portal_use_cases = use_cases::PortalUseCases::new(
            Arc::new(SubmitPortal::new(resolver, portals.clone())),
            Arc::new(ListPortals::new(portals.clone())),
        );

        Self {
            cartography,
            portals,
            use_cases: UseCases {
                location,
                route,
                portals: portal_use_cases,
            },
        }
    }
}
