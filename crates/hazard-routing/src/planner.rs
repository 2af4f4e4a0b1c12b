use hazard_core::HazardResult;
use hazard_geo::{
    bypass_waypoint, detour_anchor, nearest_hazard, Coordinate, GeometryParams, HazardRef, HazardSet,
    Route,
};
use serde::Serialize;

use crate::collaborator::Router;

/// Alternate route around the hazard nearest to the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detour {
    pub avoided: HazardRef,
    pub anchor: Coordinate,
    pub waypoint: Coordinate,
    pub route: Route,
}

/// Single-detour heuristic: only the hazard nearest to the origin is steered
/// around, so a route blocked by several disjoint hazards may still cross the
/// others.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetourPlanner {
    params: GeometryParams,
}

impl DetourPlanner {
    pub fn new(params: GeometryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GeometryParams {
        &self.params
    }

    /// Expects a route already known to cross `hazards`. Collaborator
    /// failures degrade to `None`.
    pub async fn plan<R: Router + ?Sized>(
        &self,
        route: &Route,
        origin: Coordinate,
        hazards: &HazardSet,
        router: &R,
    ) -> Option<Detour> {
        let Some(nearest) = nearest_hazard(origin, hazards) else {
            tracing::warn!("Detour requested without any hazard to avoid");
            metrics::counter!("hazard_detours_total", "outcome" => "no_hazard").increment(1);
            return None;
        };
        let anchor = detour_anchor(route, &nearest.geometry);
        let waypoint = bypass_waypoint(anchor, self.params.detour_offset_deg);
        let destination = route.destination();
        tracing::debug!(
            hazard = ?nearest.hazard,
            distance_km = nearest.distance_km,
            anchor_lat = anchor.latitude,
            anchor_lon = anchor.longitude,
            "Planning detour"
        );

        let (to_waypoint, to_destination) = tokio::join!(
            router.route(origin, waypoint),
            router.route(waypoint, destination)
        );
        let (Some(first), Some(second)) = (
            settle_leg("origin_to_waypoint", to_waypoint),
            settle_leg("waypoint_to_destination", to_destination),
        ) else {
            metrics::counter!("hazard_detours_total", "outcome" => "leg_failed").increment(1);
            return None;
        };

        metrics::counter!("hazard_detours_total", "outcome" => "planned").increment(1);
        Some(Detour {
            avoided: nearest.hazard,
            anchor,
            waypoint,
            route: Route::concat(&first, &second),
        })
    }
}

/// Detour with the default buffer radius and offset, reduced to its route.
pub async fn plan_detour<R: Router + ?Sized>(
    route: &Route,
    origin: Coordinate,
    hazards: &HazardSet,
    router: &R,
) -> Option<Route> {
    DetourPlanner::default()
        .plan(route, origin, hazards, router)
        .await
        .map(|detour| detour.route)
}

fn settle_leg(leg: &'static str, result: HazardResult<Option<Route>>) -> Option<Route> {
    match result {
        Ok(Some(route)) => Some(route),
        Ok(None) => {
            tracing::warn!(leg, "Detour leg returned no route");
            None
        }
        Err(err) => {
            tracing::warn!(leg, error = %err, "Detour leg request failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{line, FnRouter};
    use hazard_core::HazardError;
    use hazard_geo::{HazardArea, HazardReport, Severity};

    fn blocked_route() -> Route {
        line(Coordinate::new(17.30, 78.40), Coordinate::new(17.40, 78.50))
    }

    fn single_report() -> (HazardReport, HazardSet) {
        let report = HazardReport::new(Coordinate::new(17.35, 78.45), Severity::High);
        let hazards = HazardSet::new(vec![report.clone()], Vec::new());
        (report, hazards)
    }

    #[tokio::test]
    async fn merged_route_keeps_both_legs() {
        let (report, hazards) = single_report();
        let router = FnRouter::straight_lines();
        let route = blocked_route();

        let detour = DetourPlanner::default()
            .plan(&route, route.origin(), &hazards, &router)
            .await
            .unwrap();

        assert_eq!(detour.avoided, HazardRef::Report(report.id));
        assert_eq!(detour.route.len(), 4);
        assert_eq!(detour.route.origin(), route.origin());
        assert_eq!(detour.route.destination(), route.destination());
        assert!((detour.waypoint.latitude - 17.36).abs() < 1e-9);
        assert!((detour.waypoint.longitude - 78.46).abs() < 1e-9);

        let calls = router.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.contains(&(route.origin(), detour.waypoint)));
        assert!(calls.contains(&(detour.waypoint, route.destination())));
    }

    #[tokio::test]
    async fn point_count_is_the_sum_of_the_legs() {
        let (_, hazards) = single_report();
        let router = FnRouter::new(|from, to| {
            let mid = Coordinate::new((from.latitude + to.latitude) / 2.0, from.longitude);
            Ok(Some(Route::new(vec![from, mid, to]).unwrap()))
        });
        let route = blocked_route();
        let alternate = plan_detour(&route, route.origin(), &hazards, &router).await.unwrap();
        assert_eq!(alternate.len(), 6);
    }

    #[tokio::test]
    async fn failed_leg_yields_no_detour() {
        let (_, hazards) = single_report();
        let route = blocked_route();
        let destination = route.destination();
        let router = FnRouter::new(move |from, to| {
            if to == destination {
                Err(HazardError::upstream("connection reset"))
            } else {
                Ok(Some(Route::new(vec![from, to]).unwrap()))
            }
        });
        assert!(plan_detour(&route, route.origin(), &hazards, &router).await.is_none());
    }

    #[tokio::test]
    async fn empty_leg_yields_no_detour() {
        let (_, hazards) = single_report();
        let route = blocked_route();
        let origin = route.origin();
        let router = FnRouter::new(move |from, to| {
            if from == origin {
                Ok(None)
            } else {
                Ok(Some(Route::new(vec![from, to]).unwrap()))
            }
        });
        assert!(plan_detour(&route, route.origin(), &hazards, &router).await.is_none());
        assert_eq!(router.calls().len(), 2);
    }

    #[tokio::test]
    async fn no_hazards_means_no_requests() {
        let router = FnRouter::straight_lines();
        let route = blocked_route();
        assert!(plan_detour(&route, route.origin(), &HazardSet::default(), &router).await.is_none());
        assert!(router.calls().is_empty());
    }

    #[tokio::test]
    async fn report_nearer_than_area_is_avoided() {
        let report = HazardReport::new(Coordinate::new(17.32, 78.42), Severity::Medium);
        let area = HazardArea::rectangle(Coordinate::new(17.37, 78.47), Coordinate::new(17.38, 78.48));
        let hazards = HazardSet::new(vec![report.clone()], vec![area]);
        let route = blocked_route();
        let detour = DetourPlanner::default()
            .plan(&route, route.origin(), &hazards, &FnRouter::straight_lines())
            .await
            .unwrap();
        assert_eq!(detour.avoided, HazardRef::Report(report.id));
        assert!((detour.anchor.latitude - 17.32).abs() < 1e-9);
    }

    #[tokio::test]
    async fn legs_are_requested_concurrently() {
        let (_, hazards) = single_report();
        let router = FnRouter::straight_lines().with_delay(std::time::Duration::from_millis(20));
        let route = blocked_route();
        assert!(plan_detour(&route, route.origin(), &hazards, &router).await.is_some());
        assert_eq!(router.max_in_flight(), 2);
    }

    #[tokio::test]
    async fn custom_offset_moves_the_waypoint() {
        let (_, hazards) = single_report();
        let planner = DetourPlanner::new(GeometryParams {
            detour_offset_deg: 0.05,
            ..GeometryParams::default()
        });
        let route = blocked_route();
        let detour = planner
            .plan(&route, route.origin(), &hazards, &FnRouter::straight_lines())
            .await
            .unwrap();
        assert!((detour.waypoint.latitude - 17.40).abs() < 1e-9);
    }
}
