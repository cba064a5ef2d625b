use geo_types::Coord;
use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Length of one degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

// geo-types stores x = longitude, y = latitude
impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Coord {
            x: point.lng,
            y: point.lat,
        }
    }
}

/// Axis-aligned lat/lng rectangle enclosing a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

/// A point in the local equirectangular plane, in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn distance_to(&self, other: PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Equirectangular projection around a reference latitude.
///
/// East-west distances are exact only at the reference latitude, so a frame
/// should be centred on the points being measured. Routes crossing the
/// antimeridian are not handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    lng_scale: f64,
}

impl LocalFrame {
    pub fn centred_on(reference_lat: f64) -> Self {
        Self {
            lng_scale: KM_PER_DEGREE * reference_lat.to_radians().cos(),
        }
    }

    pub fn project(&self, point: GeoPoint) -> PlanarPoint {
        PlanarPoint {
            x: point.lng * self.lng_scale,
            y: point.lat * KM_PER_DEGREE,
        }
    }
}

/// Round a distance to one decimal place of kilometres.
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
