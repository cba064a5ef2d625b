use thiserror::Error;
use tracing::warn;

use crate::{
    geometry::{Envelope, GeoPoint, KM_PER_DEGREE},
    types::model::ride::Ride,
};

/// Roughly 100 km at mid-latitudes.
pub const DEFAULT_MARGIN_DEGREES: f64 = 0.9;

/// The margin has to stay this many times wider than the largest search radius.
const MARGIN_TO_RADIUS_RATIO: f64 = 1.5;

/// Offsets are measured at the search point's latitude. Beyond this latitude
/// a degree of longitude is short enough that the default margin covers less
/// than the maximum search radius east-west.
pub const MARGIN_RELIABLE_LATITUDE: f64 = 60.0;

#[derive(Error, Debug, PartialEq)]
#[error("pre-filter margin of {degrees} degrees does not cover {min_km} km")]
pub struct MarginTooSmall {
    pub degrees: f64,
    pub min_km: f64,
}

/// Half-width of the pre-filter box, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefilterMargin(f64);

impl PrefilterMargin {
    pub fn new(degrees: f64, max_radius_km: f64) -> Result<Self, MarginTooSmall> {
        let min_km = max_radius_km * MARGIN_TO_RADIUS_RATIO;
        if !degrees.is_finite() || degrees * KM_PER_DEGREE < min_km {
            return Err(MarginTooSmall { degrees, min_km });
        }
        Ok(Self(degrees))
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl Default for PrefilterMargin {
    fn default() -> Self {
        Self(DEFAULT_MARGIN_DEGREES)
    }
}

/// `point ± margin` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordRange {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl CoordRange {
    pub fn around(point: GeoPoint, margin: PrefilterMargin) -> Self {
        let m = margin.degrees();
        Self {
            min_lat: point.lat - m,
            max_lat: point.lat + m,
            min_lng: point.lng - m,
            max_lng: point.lng + m,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }

    pub fn intersects(&self, envelope: &Envelope) -> bool {
        envelope.min.lat <= self.max_lat
            && envelope.max.lat >= self.min_lat
            && envelope.min.lng <= self.max_lng
            && envelope.max.lng >= self.min_lng
    }

    /// Whether a ride could pass near the centre of this range.
    pub fn admits(&self, ride: &Ride) -> bool {
        self.contains(ride.origin.point)
            || self.contains(ride.destination.point)
            || self.intersects(&ride.route_envelope)
    }
}

/// Cheap range predicate narrowing the rides that get projected exactly.
///
/// A ride is admitted when, for both rider points, its origin or destination
/// lies within the margin box, or its route envelope overlaps the box. The
/// envelope clause keeps long rides whose endpoints are both far away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBoxFilter {
    pub pickup: CoordRange,
    pub dropoff: CoordRange,
}

impl BoundingBoxFilter {
    pub fn around(pickup: GeoPoint, dropoff: GeoPoint, margin: PrefilterMargin) -> Self {
        for point in [pickup, dropoff] {
            if point.lat.abs() > MARGIN_RELIABLE_LATITUDE {
                warn!(
                    lat = point.lat,
                    margin = margin.degrees(),
                    "search point outside the latitude band the pre-filter margin is sized for"
                );
            }
        }
        Self {
            pickup: CoordRange::around(pickup, margin),
            dropoff: CoordRange::around(dropoff, margin),
        }
    }

    pub fn admits(&self, ride: &Ride) -> bool {
        self.pickup.admits(ride) && self.dropoff.admits(ride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ride_along;

    #[test]
    fn test_default_margin_covers_max_radius() {
        assert!(PrefilterMargin::new(DEFAULT_MARGIN_DEGREES, 50.0).is_ok());
    }

    #[test]
    fn test_margin_too_small() {
        let err = PrefilterMargin::new(0.3, 50.0).unwrap_err();
        assert_eq!(err.min_km, 75.0);
        assert!(PrefilterMargin::new(f64::NAN, 50.0).is_err());
    }

    #[test]
    fn test_range_edges_inclusive() {
        let range = CoordRange::around(GeoPoint::new(10.0, 20.0), PrefilterMargin::default());
        assert!(range.contains(GeoPoint::new(10.89, 19.11)));
        assert!(!range.contains(GeoPoint::new(10.0, 21.0)));
    }

    #[test]
    fn test_admits_by_endpoints() {
        let ride = ride_along(1, &[(45.0, 7.0), (45.5, 7.5)]);
        let filter = BoundingBoxFilter::around(
            GeoPoint::new(45.1, 7.1),
            GeoPoint::new(45.4, 7.4),
            PrefilterMargin::default(),
        );
        assert!(filter.admits(&ride));
    }

    #[test]
    fn test_rejects_far_away_ride() {
        let ride = ride_along(1, &[(45.0, 7.0), (45.5, 7.5)]);
        let filter = BoundingBoxFilter::around(
            GeoPoint::new(48.0, 2.0),
            GeoPoint::new(48.5, 2.5),
            PrefilterMargin::default(),
        );
        assert!(!filter.admits(&ride));
    }

    #[test]
    fn test_rejects_when_only_pickup_is_near() {
        let ride = ride_along(1, &[(45.0, 7.0), (45.5, 7.5)]);
        let filter = BoundingBoxFilter::around(
            GeoPoint::new(45.1, 7.1),
            GeoPoint::new(40.0, 3.0),
            PrefilterMargin::default(),
        );
        assert!(!filter.admits(&ride));
    }

    #[test]
    fn test_admits_long_ride_through_the_box() {
        // endpoints are 5 degrees away, the route passes the rider
        let ride = ride_along(1, &[(40.0, 7.0), (45.0, 7.0), (50.0, 7.0)]);
        let filter = BoundingBoxFilter::around(
            GeoPoint::new(44.8, 7.05),
            GeoPoint::new(45.2, 7.05),
            PrefilterMargin::default(),
        );
        assert!(!filter.pickup.contains(ride.origin.point));
        assert!(!filter.pickup.contains(ride.destination.point));
        assert!(filter.admits(&ride));
    }
}
