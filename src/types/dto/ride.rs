use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use geojson::Geometry;
use serde::{Deserialize, Serialize};

use crate::{
    ride_geo::RouteGeometry,
    types::model::ride::{Place, Ride, RideStatus},
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateRide {
    pub driver_id: String,
    pub origin: Place,
    pub destination: Place,
    pub route: Geometry,
    pub departure_time: DateTime<Utc>,
    pub seats_total: i32,
    pub price_per_seat: BigDecimal,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRide {
    pub id: i64,
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdate {
    pub status: RideStatus,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RideDetail {
    pub id: i64,
    pub driver_id: String,
    pub origin: Place,
    pub destination: Place,
    pub route: Geometry,
    pub route_length_km: f64,
    pub departure_time: DateTime<Utc>,
    pub status: RideStatus,
    pub seats_total: i32,
    pub seats_available: i32,
    pub price_per_seat: BigDecimal,
}

impl From<Ride> for RideDetail {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id,
            route: ride.route.to_geometry(),
            driver_id: ride.driver_id,
            origin: ride.origin,
            destination: ride.destination,
            route_length_km: ride.route_length_km,
            departure_time: ride.departure_time,
            status: ride.status,
            seats_total: ride.seats_total,
            seats_available: ride.seats_available,
            price_per_seat: ride.price_per_seat,
        }
    }
}
