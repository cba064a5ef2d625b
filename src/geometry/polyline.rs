use geo_types::LineString;
use thiserror::Error;

use super::{
    point::{GeoPoint, LocalFrame},
    segment::Segment,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("route path has {0} point(s), at least 2 are required")]
    TooFewPoints(usize),
    #[error("route path point {0} has a non-finite coordinate")]
    NonFiniteCoordinate(usize),
}

/// A driver's planned path from origin to destination, in travel order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePath(Vec<GeoPoint>);

impl RoutePath {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    pub fn to_polyline(&self) -> Result<Polyline, PathError> {
        Polyline::new(&self.0)
    }
}

impl From<&LineString<f64>> for RoutePath {
    fn from(line: &LineString<f64>) -> Self {
        Self(line.coords().map(|c| GeoPoint::from(*c)).collect())
    }
}

impl From<&RoutePath> for LineString<f64> {
    fn from(path: &RoutePath) -> Self {
        path.0.iter().map(|p| geo_types::Coord::from(*p)).collect()
    }
}

/// Where a query point lands on a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathProjection {
    /// Distance from the query point to the nearest point of the path.
    pub offset_km: f64,
    /// Distance along the path from its start to that nearest point.
    pub arc_position_km: f64,
}

/// Length of a single leg, measured in a frame centred on the leg.
fn leg_length_km(start: GeoPoint, end: GeoPoint) -> f64 {
    let frame = LocalFrame::centred_on((start.lat + end.lat) / 2.0);
    Segment::new(frame.project(start), frame.project(end)).length()
}

/// A validated route path with cumulative arc lengths at every vertex.
///
/// Arc lengths are fixed per path, so positions of different query points
/// along the same path are comparable. Offsets are measured in a frame
/// centred on each query point's own latitude.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<GeoPoint>,
    cumulative_km: Vec<f64>,
}

impl Polyline {
    pub fn new(points: &[GeoPoint]) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooFewPoints(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(PathError::NonFiniteCoordinate(index));
        }

        let mut cumulative_km = Vec::with_capacity(points.len());
        let mut travelled = 0.0;
        cumulative_km.push(travelled);
        for pair in points.windows(2) {
            travelled += leg_length_km(pair[0], pair[1]);
            cumulative_km.push(travelled);
        }

        Ok(Self {
            points: points.to_vec(),
            cumulative_km,
        })
    }

    pub fn length_km(&self) -> f64 {
        self.cumulative_km.last().copied().unwrap_or(0.0)
    }

    /// Nearest point of the path to `point`. On ties the earliest segment wins.
    pub fn project(&self, point: GeoPoint) -> PathProjection {
        let frame = LocalFrame::centred_on(point.lat);
        let query = frame.project(point);
        let mut best = PathProjection {
            offset_km: f64::INFINITY,
            arc_position_km: 0.0,
        };
        for (index, pair) in self.points.windows(2).enumerate() {
            let segment = Segment::new(frame.project(pair[0]), frame.project(pair[1]));
            let projection = segment.project(query);
            if projection.distance_km < best.offset_km {
                let leg_km = self.cumulative_km[index + 1] - self.cumulative_km[index];
                best = PathProjection {
                    offset_km: projection.distance_km,
                    arc_position_km: self.cumulative_km[index] + projection.fraction * leg_km,
                };
            }
        }
        best.arc_position_km = best.arc_position_km.clamp(0.0, self.length_km());
        best
    }
}
