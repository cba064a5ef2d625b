use geo::{BoundingRect, HaversineLength};
use geo_types::{LineString, MultiLineString};
use geojson::Geometry;
use thiserror::Error;

use crate::geometry::{Envelope, GeoPoint, RoutePath};

#[derive(Error, Debug)]
pub enum RouteGeometryError {
    #[error("route must be a LineString or MultiLineString, got {0}")]
    UnsupportedGeometry(&'static str),
    #[error("invalid route geometry: {0}")]
    GeoJson(#[from] geojson::Error),
}

/// Read a driver's route out of a GeoJSON geometry.
///
/// Line strings of a MultiLineString are joined end to end in the order given.
pub trait ToRoutePath {
    fn to_route_path(&self) -> Result<RoutePath, RouteGeometryError>;
}

impl ToRoutePath for geojson::Value {
    fn to_route_path(&self) -> Result<RoutePath, RouteGeometryError> {
        match self {
            geojson::Value::LineString(_) => {
                Ok(RoutePath::from(&LineString::<f64>::try_from(self)?))
            }
            geojson::Value::MultiLineString(_) => {
                let lines = MultiLineString::<f64>::try_from(self)?;
                Ok(RoutePath::new(
                    lines
                        .iter()
                        .flat_map(|line| line.coords().map(|c| GeoPoint::from(*c)))
                        .collect(),
                ))
            }
            other => Err(RouteGeometryError::UnsupportedGeometry(geometry_type(other))),
        }
    }
}

fn geometry_type(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

impl ToRoutePath for Geometry {
    fn to_route_path(&self) -> Result<RoutePath, RouteGeometryError> {
        self.value.to_route_path()
    }
}

pub trait RouteGeometry {
    fn to_geometry(&self) -> Geometry;
    fn envelope(&self) -> Option<Envelope>;
    fn haversine_length_km(&self) -> f64;
}

impl RouteGeometry for RoutePath {
    fn to_geometry(&self) -> Geometry {
        let line = LineString::from(self);
        let mut geometry = Geometry::new(geojson::Value::from(&line));
        geometry.bbox = self
            .envelope()
            .map(|e| vec![e.min.lng, e.min.lat, e.max.lng, e.max.lat]);
        geometry
    }

    fn envelope(&self) -> Option<Envelope> {
        LineString::from(self).bounding_rect().map(|rect| Envelope {
            min: GeoPoint::from(rect.min()),
            max: GeoPoint::from(rect.max()),
        })
    }

    fn haversine_length_km(&self) -> f64 {
        LineString::from(self).haversine_length() / 1000.0
    }
}
