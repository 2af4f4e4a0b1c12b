//! Hazard geometry: the route/hazard data model, the intersection check and the
//! geometric half of detour planning.
//!
//! Coordinates are carried as named `latitude`/`longitude` fields everywhere in
//! the public API. The `geo` crate's `x = longitude, y = latitude` order only
//! appears inside this crate.

pub mod coordinate;
pub mod detour;
pub mod hazard;
pub mod intersect;

pub use coordinate::{BoundingBox, Coordinate, Route};
pub use detour::{bypass_waypoint, detour_anchor, nearest_hazard, NearestHazard, SelectedGeometry};
pub use hazard::{AreaKind, HazardArea, HazardRef, HazardReport, HazardSet, Severity};
pub use intersect::{blocking_hazards, intersects, intersects_with, report_buffer};

/// Buffer radius applied around every point report.
pub const REPORT_BUFFER_M: f64 = 100.0;

/// Offset applied to the detour anchor, in degrees on both axes.
pub const DETOUR_OFFSET_DEG: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryParams {
    pub report_radius_m: f64,
    pub detour_offset_deg: f64,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            report_radius_m: REPORT_BUFFER_M,
            detour_offset_deg: DETOUR_OFFSET_DEG,
        }
    }
}
