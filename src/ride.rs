use bigdecimal::BigDecimal;
use sqlx::types::Json;
use thiserror::Error;

use crate::{
    geometry::{PathError, RoutePath},
    ride_geo::{RouteGeometry, RouteGeometryError, ToRoutePath},
    search::{check_point, InvalidRequest},
    types::{dto::ride::CreateRide, model::ride::NewRideRow},
};

#[derive(Error, Debug)]
pub enum InvalidRide {
    #[error(transparent)]
    Geometry(#[from] RouteGeometryError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Coordinate(#[from] InvalidRequest),
    #[error("seatsTotal must be positive, got {0}")]
    Seats(i32),
    #[error("pricePerSeat must not be negative")]
    Price,
}

/// Turn a create request into the row to store.
///
/// The route is normalised to a single LineString and must be projectable,
/// so every stored ride can be matched against.
pub fn create_ride(request: CreateRide) -> Result<NewRideRow, InvalidRide> {
    if request.seats_total <= 0 {
        return Err(InvalidRide::Seats(request.seats_total));
    }
    if request.price_per_seat < BigDecimal::from(0) {
        return Err(InvalidRide::Price);
    }

    check_point("origin", request.origin.point)?;
    check_point("destination", request.destination.point)?;

    let route: RoutePath = request.route.to_route_path()?;
    route.to_polyline()?;
    for point in route.points() {
        check_point("route", *point)?;
    }
    let route_envelope = route
        .envelope()
        .ok_or(PathError::TooFewPoints(route.points().len()))?;

    Ok(NewRideRow {
        driver_id: request.driver_id,
        origin: request.origin,
        destination: request.destination,
        route: Json(route.to_geometry()),
        route_envelope,
        route_length_km: route.haversine_length_km(),
        departure_time: request.departure_time,
        seats_total: request.seats_total,
        price_per_seat: request.price_per_seat,
    })
}

#[cfg(test)]
mod tests {
    use geojson::Geometry;

    use super::*;
    use crate::{
        geometry::GeoPoint,
        test_support::departure,
        types::model::ride::Place,
    };

    fn request(route: Geometry) -> CreateRide {
        CreateRide {
            driver_id: "user_1".to_string(),
            origin: Place {
                name: "Torino".to_string(),
                address: "Porta Nuova".to_string(),
                point: GeoPoint::new(45.06, 7.68),
            },
            destination: Place {
                name: "Milano".to_string(),
                address: "Centrale".to_string(),
                point: GeoPoint::new(45.48, 9.20),
            },
            route,
            departure_time: departure(),
            seats_total: 3,
            price_per_seat: BigDecimal::from(12),
        }
    }

    #[test]
    fn test_builds_row_with_envelope() {
        let route = Geometry::new(geojson::Value::LineString(vec![
            vec![7.68, 45.06],
            vec![8.60, 45.30],
            vec![9.20, 45.48],
        ]));
        let row = create_ride(request(route)).unwrap();
        assert_eq!(row.route_envelope.min, GeoPoint::new(45.06, 7.68));
        assert_eq!(row.route_envelope.max, GeoPoint::new(45.48, 9.20));
        assert!(row.route_length_km > 100.0 && row.route_length_km < 200.0);
    }

    #[test]
    fn test_multi_line_string_is_stored_as_line_string() {
        let route = Geometry::new(geojson::Value::MultiLineString(vec![
            vec![vec![7.68, 45.06], vec![8.60, 45.30]],
            vec![vec![8.60, 45.30], vec![9.20, 45.48]],
        ]));
        let row = create_ride(request(route)).unwrap();
        assert!(matches!(row.route.0.value, geojson::Value::LineString(_)));
    }

    #[test]
    fn test_rejects_single_point_route() {
        let route = Geometry::new(geojson::Value::LineString(vec![vec![7.68, 45.06]]));
        assert!(matches!(
            create_ride(request(route)),
            Err(InvalidRide::Path(PathError::TooFewPoints(1)))
        ));
    }

    #[test]
    fn test_rejects_polygon_route() {
        let route = Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ]]));
        assert!(matches!(
            create_ride(request(route)),
            Err(InvalidRide::Geometry(_))
        ));
    }

    #[test]
    fn test_rejects_zero_seats() {
        let route = Geometry::new(geojson::Value::LineString(vec![
            vec![7.68, 45.06],
            vec![9.20, 45.48],
        ]));
        let mut req = request(route);
        req.seats_total = 0;
        assert!(matches!(create_ride(req), Err(InvalidRide::Seats(0))));
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        let route = Geometry::new(geojson::Value::LineString(vec![
            vec![7.68, 45.06],
            vec![200.0, 45.48],
        ]));
        assert!(matches!(
            create_ride(request(route)),
            Err(InvalidRide::Coordinate(InvalidRequest::Longitude {
                field: "route",
                ..
            }))
        ));

        let route = Geometry::new(geojson::Value::LineString(vec![
            vec![7.68, 45.06],
            vec![9.20, 45.48],
        ]));
        let mut req = request(route);
        req.origin.point = GeoPoint::new(95.0, 7.68);
        assert!(matches!(
            create_ride(req),
            Err(InvalidRide::Coordinate(InvalidRequest::Latitude {
                field: "origin",
                ..
            }))
        ));
    }
}
