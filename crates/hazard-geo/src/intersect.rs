use geo::{HaversineDestination, Intersects, LineString, Polygon};

use crate::coordinate::{Coordinate, Route};
use crate::hazard::{HazardArea, HazardRef, HazardSet};
use crate::GeometryParams;

const BUFFER_STEPS: usize = 64;

/// Circle of `radius_m` around `center`, as a closed polygon.
pub fn report_buffer(center: Coordinate, radius_m: f64) -> Polygon<f64> {
    let center = center.to_point();
    let ring: LineString<f64> = (0..BUFFER_STEPS)
        .map(|step| {
            let bearing = step as f64 * 360.0 / BUFFER_STEPS as f64;
            center.haversine_destination(bearing, radius_m).0
        })
        .collect();
    Polygon::new(ring, Vec::new())
}

/// Whether the route passes through any hazard, using the default buffer
/// radius.
pub fn intersects(route: &Route, hazards: &HazardSet) -> bool {
    intersects_with(route, hazards, &GeometryParams::default())
}

pub fn intersects_with(route: &Route, hazards: &HazardSet, params: &GeometryParams) -> bool {
    if hazards.is_empty() {
        return false;
    }
    let line = route.to_line();
    hazards
        .reports
        .iter()
        .any(|report| line.intersects(&report_buffer(report.location, params.report_radius_m)))
        || hazards.areas.iter().any(|area| area_hit(&line, route, area))
}

/// Every hazard the route passes through, reports first.
pub fn blocking_hazards(
    route: &Route,
    hazards: &HazardSet,
    params: &GeometryParams,
) -> Vec<HazardRef> {
    let line = route.to_line();
    let reports = hazards
        .reports
        .iter()
        .filter(|report| line.intersects(&report_buffer(report.location, params.report_radius_m)))
        .map(|report| HazardRef::Report(report.id));
    let areas = hazards
        .areas
        .iter()
        .filter(|area| area_hit(&line, route, area))
        .map(|area| HazardRef::Area(area.id));
    reports.chain(areas).collect()
}

fn area_hit(line: &LineString<f64>, route: &Route, area: &HazardArea) -> bool {
    let polygon = match area.to_polygon() {
        Ok(polygon) => polygon,
        Err(err) => {
            tracing::warn!(area_id = %area.id, error = %err, "Skipping malformed hazard area");
            return false;
        }
    };
    match area.bounds() {
        Some(bounds) if !bounds.overlaps(&route.bounds()) => false,
        _ => line.intersects(&polygon),
    }
}
