use geo::{LineString, Polygon};
use hazard_core::{now_epoch_millis, AreaId, EpochMillis, ErrorCode, HazardError, HazardResult, ReportId};
use serde::{Deserialize, Serialize};

use crate::coordinate::{BoundingBox, Coordinate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A user-reported point hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardReport {
    pub id: ReportId,
    pub location: Coordinate,
    pub severity: Severity,
    pub reported_at_ms: EpochMillis,
}

impl HazardReport {
    pub fn new(location: Coordinate, severity: Severity) -> Self {
        Self {
            id: ReportId::new(),
            location,
            severity,
            reported_at_ms: now_epoch_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaKind {
    Rectangle,
    Polygon,
}

/// A user-drawn hazard zone. The first ring is the outer boundary, any
/// further rings are holes. Rings may be given open or closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardArea {
    pub id: AreaId,
    pub kind: AreaKind,
    pub rings: Vec<Vec<Coordinate>>,
    pub drawn_at_ms: EpochMillis,
}

impl HazardArea {
    pub fn new(kind: AreaKind, rings: Vec<Vec<Coordinate>>) -> Self {
        Self {
            id: AreaId::new(),
            kind,
            rings,
            drawn_at_ms: now_epoch_millis(),
        }
    }

    pub fn polygon(ring: Vec<Coordinate>) -> Self {
        Self::new(AreaKind::Polygon, vec![ring])
    }

    /// Axis-aligned rectangle spanned by two opposite corners.
    pub fn rectangle(corner_a: Coordinate, corner_b: Coordinate) -> Self {
        let south = corner_a.latitude.min(corner_b.latitude);
        let north = corner_a.latitude.max(corner_b.latitude);
        let west = corner_a.longitude.min(corner_b.longitude);
        let east = corner_a.longitude.max(corner_b.longitude);
        let ring = vec![
            Coordinate::new(south, west),
            Coordinate::new(south, east),
            Coordinate::new(north, east),
            Coordinate::new(north, west),
        ];
        Self::new(AreaKind::Rectangle, vec![ring])
    }

    pub fn outer_ring(&self) -> &[Coordinate] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rejects areas that cannot form a polygon: no outer ring, fewer than
    /// three distinct outer points, or non-finite coordinates.
    pub fn validate(&self) -> HazardResult<()> {
        let outer = self.outer_ring();
        if distinct_points(outer) < 3 {
            return Err(HazardError::new(
                ErrorCode::MalformedHazard,
                format!(
                    "hazard area {} needs at least 3 ring points, got {}",
                    self.id,
                    distinct_points(outer)
                ),
            ));
        }
        if self.rings.iter().flatten().any(|coord| !coord.is_valid()) {
            return Err(HazardError::new(
                ErrorCode::MalformedHazard,
                format!("hazard area {} has coordinates out of range", self.id),
            ));
        }
        Ok(())
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::around(self.outer_ring())
    }

    pub(crate) fn outer_line(&self) -> LineString<f64> {
        ring_to_line(self.outer_ring())
    }

    /// Polygon built from the rings. Holes with fewer than three distinct
    /// points are dropped.
    pub(crate) fn to_polygon(&self) -> HazardResult<Polygon<f64>> {
        self.validate()?;
        let interiors = self
            .rings
            .iter()
            .skip(1)
            .filter(|ring| distinct_points(ring) >= 3)
            .map(|ring| ring_to_line(ring))
            .collect();
        Ok(Polygon::new(self.outer_line(), interiors))
    }
}

fn ring_to_line(ring: &[Coordinate]) -> LineString<f64> {
    let mut line: LineString<f64> = ring.iter().map(|coord| coord.to_coord()).collect();
    line.close();
    line
}

fn distinct_points(ring: &[Coordinate]) -> usize {
    let mut seen: Vec<&Coordinate> = Vec::with_capacity(ring.len());
    for coord in ring {
        if !seen.contains(&coord) {
            seen.push(coord);
        }
    }
    seen.len()
}

/// Identifies one hazard inside a [`HazardSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum HazardRef {
    Report(ReportId),
    Area(AreaId),
}

/// Snapshot of every hazard known at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HazardSet {
    #[serde(default)]
    pub reports: Vec<HazardReport>,
    #[serde(default)]
    pub areas: Vec<HazardArea>,
}

impl HazardSet {
    pub fn new(reports: Vec<HazardReport>, areas: Vec<HazardArea>) -> Self {
        Self { reports, areas }
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty() && self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_normalizes_corners() {
        let area = HazardArea::rectangle(Coordinate::new(17.36, 78.46), Coordinate::new(17.34, 78.44));
        assert_eq!(area.kind, AreaKind::Rectangle);
        assert_eq!(area.outer_ring()[0], Coordinate::new(17.34, 78.44));
        assert_eq!(area.outer_ring()[2], Coordinate::new(17.36, 78.46));
        assert!(area.validate().is_ok());
    }

    #[test]
    fn two_point_ring_is_malformed() {
        let area = HazardArea::polygon(vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]);
        let err = area.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedHazard);
    }

    #[test]
    fn closed_triangle_of_repeated_points_is_malformed() {
        let p = Coordinate::new(1.0, 1.0);
        let q = Coordinate::new(2.0, 2.0);
        let area = HazardArea::polygon(vec![p, q, p, q]);
        assert!(area.validate().is_err());
    }

    #[test]
    fn empty_area_is_malformed() {
        let area = HazardArea::new(AreaKind::Polygon, Vec::new());
        assert!(area.validate().is_err());
        assert!(area.bounds().is_none());
    }

    #[test]
    fn severity_uses_snake_case() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
