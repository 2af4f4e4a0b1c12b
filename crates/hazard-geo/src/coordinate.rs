use geo::{Coord, LineString, Point};
use hazard_core::{HazardError, HazardResult};
use serde::{Deserialize, Serialize};

/// WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn offset(&self, delta_deg: f64) -> Self {
        Self::new(self.latitude + delta_deg, self.longitude + delta_deg)
    }

    pub(crate) fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    pub(crate) fn to_point(self) -> Point<f64> {
        Point::from(self.to_coord())
    }

    pub(crate) fn from_point(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn of(coord: Coordinate) -> Self {
        Self {
            north: coord.latitude,
            south: coord.latitude,
            east: coord.longitude,
            west: coord.longitude,
        }
    }

    /// Smallest box holding every coordinate, or `None` for an empty input.
    pub fn around<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let mut bbox = Self::of(*iter.next()?);
        for coord in iter {
            bbox.include(*coord);
        }
        Some(bbox)
    }

    pub fn include(&mut self, coord: Coordinate) {
        self.north = self.north.max(coord.latitude);
        self.south = self.south.min(coord.latitude);
        self.east = self.east.max(coord.longitude);
        self.west = self.west.min(coord.longitude);
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.west <= other.east
            && other.west <= self.east
            && self.south <= other.north
            && other.south <= self.north
    }
}

/// Driving path from an origin to a destination. Always holds at least two
/// points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    pub fn new(points: Vec<Coordinate>) -> HazardResult<Self> {
        if points.len() < 2 {
            return Err(HazardError::invalid_input(format!(
                "a route needs at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Joins two legs end to end. The shared waypoint is kept twice.
    pub fn concat(first: &Route, second: &Route) -> Self {
        let mut points = Vec::with_capacity(first.len() + second.len());
        points.extend_from_slice(&first.points);
        points.extend_from_slice(&second.points);
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn origin(&self) -> Coordinate {
        self.points[0]
    }

    pub fn destination(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    pub fn bounds(&self) -> BoundingBox {
        let mut bbox = BoundingBox::of(self.origin());
        for coord in &self.points[1..] {
            bbox.include(*coord);
        }
        bbox
    }

    pub(crate) fn to_line(&self) -> LineString<f64> {
        self.points.iter().map(|coord| coord.to_coord()).collect()
    }
}

impl TryFrom<Vec<Coordinate>> for Route {
    type Error = HazardError;

    fn try_from(points: Vec<Coordinate>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Route> for Vec<Coordinate> {
    fn from(route: Route) -> Self {
        route.points
    }
}
