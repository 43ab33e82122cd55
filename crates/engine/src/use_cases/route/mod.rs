//! Route planning use cases.

mod plan_route;

pub use plan_route::{PlanRoute, PlanRouteError, PlannedRoute, RouteOutcome, RouteStep};

use std::sync::Arc;

/// Container for route use cases.
pub struct RouteUseCases {
    pub plan: Arc<PlanRoute>,
}

impl RouteUseCases {
    pub fn new(plan: Arc<PlanRoute>) -> Self {
        Self { plan }
    }
}
