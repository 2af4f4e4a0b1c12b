//! Geometry behind detour planning: which hazard to steer around, where the
//! route comes closest to it, and the waypoint that pulls the new route away.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Closest, ClosestPoint, Coord, HaversineDistance, Line, LineString, Point};
use serde::Serialize;

use crate::coordinate::{Coordinate, Route};
use crate::hazard::{HazardRef, HazardSet};

/// Geometry of the hazard picked for the detour.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectedGeometry {
    Point(Coordinate),
    /// Outer ring of a drawn area.
    Ring(Vec<Coordinate>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestHazard {
    pub hazard: HazardRef,
    pub distance_km: f64,
    pub geometry: SelectedGeometry,
}

/// Hazard closest to `origin`. Reports are measured to their point, areas to
/// their outer ring treated as a line. Reports are visited before areas and a
/// later hazard only wins with a strictly smaller distance.
pub fn nearest_hazard(origin: Coordinate, hazards: &HazardSet) -> Option<NearestHazard> {
    let origin_point = origin.to_point();
    let mut best: Option<NearestHazard> = None;

    let mut consider = |candidate: NearestHazard| {
        let closer = best
            .as_ref()
            .is_none_or(|current| candidate.distance_km < current.distance_km);
        if closer {
            best = Some(candidate);
        }
    };

    for report in &hazards.reports {
        consider(NearestHazard {
            hazard: HazardRef::Report(report.id),
            distance_km: km_between(origin_point, report.location.to_point()),
            geometry: SelectedGeometry::Point(report.location),
        });
    }

    for area in &hazards.areas {
        if let Err(err) = area.validate() {
            tracing::warn!(area_id = %area.id, error = %err, "Ignoring malformed hazard area for detour");
            continue;
        }
        let Some(closest) = closest_on(&area.outer_line(), origin_point) else {
            continue;
        };
        consider(NearestHazard {
            hazard: HazardRef::Area(area.id),
            distance_km: km_between(origin_point, closest),
            geometry: SelectedGeometry::Ring(area.outer_ring().to_vec()),
        });
    }

    best
}

/// Point on `route` nearest to the selected hazard geometry.
pub fn detour_anchor(route: &Route, geometry: &SelectedGeometry) -> Coordinate {
    let line = route.to_line();
    match geometry {
        SelectedGeometry::Point(coord) => closest_on(&line, coord.to_point())
            .map(Coordinate::from_point)
            .unwrap_or_else(|| route.origin()),
        SelectedGeometry::Ring(ring) => anchor_for_ring(route, &line, ring),
    }
}

/// Anchor shifted by `offset_deg` on both axes.
pub fn bypass_waypoint(anchor: Coordinate, offset_deg: f64) -> Coordinate {
    anchor.offset(offset_deg)
}

fn anchor_for_ring(route: &Route, line: &LineString<f64>, ring: &[Coordinate]) -> Coordinate {
    let mut ring_line: LineString<f64> = ring.iter().map(|coord| coord.to_coord()).collect();
    ring_line.close();

    if let Some(crossing) = first_crossing(line, &ring_line) {
        return Coordinate::from_point(crossing.into());
    }

    let mut best: Option<(f64, Point<f64>)> = None;
    let mut keep = |distance: f64, on_route: Point<f64>| {
        if best.is_none_or(|(current, _)| distance < current) {
            best = Some((distance, on_route));
        }
    };

    // Ring vertices projected onto the route.
    for vertex in ring {
        let vertex = vertex.to_point();
        if let Some(on_route) = closest_on(line, vertex) {
            keep(vertex.haversine_distance(&on_route), on_route);
        }
    }
    // Route vertices that come close to a ring edge.
    for coord in route.points() {
        let on_route = coord.to_point();
        if let Some(on_ring) = closest_on(&ring_line, on_route) {
            keep(on_route.haversine_distance(&on_ring), on_route);
        }
    }

    best.map(|(_, point)| Coordinate::from_point(point))
        .unwrap_or_else(|| route.origin())
}

/// Earliest point along `route` where it touches an edge of `ring`.
fn first_crossing(route: &LineString<f64>, ring: &LineString<f64>) -> Option<Coord<f64>> {
    for segment in route.lines() {
        let mut nearest: Option<(f64, Coord<f64>)> = None;
        for edge in ring.lines() {
            let Some(hit) = segment_hit(segment, edge) else {
                continue;
            };
            let along = squared_distance(segment.start, hit);
            if nearest.is_none_or(|(current, _)| along < current) {
                nearest = Some((along, hit));
            }
        }
        if let Some((_, hit)) = nearest {
            return Some(hit);
        }
    }
    None
}

fn segment_hit(segment: Line<f64>, edge: Line<f64>) -> Option<Coord<f64>> {
    match line_intersection(segment, edge)? {
        LineIntersection::SinglePoint { intersection, .. } => Some(intersection),
        LineIntersection::Collinear { intersection } => {
            let (a, b) = (intersection.start, intersection.end);
            if squared_distance(segment.start, a) <= squared_distance(segment.start, b) {
                Some(a)
            } else {
                Some(b)
            }
        }
    }
}

fn squared_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    dx * dx + dy * dy
}

fn closest_on(line: &LineString<f64>, point: Point<f64>) -> Option<Point<f64>> {
    match line.closest_point(&point) {
        Closest::Intersection(hit) | Closest::SinglePoint(hit) => Some(hit),
        Closest::Indeterminate => None,
    }
}

fn km_between(a: Point<f64>, b: Point<f64>) -> f64 {
    a.haversine_distance(&b) / 1000.0
}
