use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use color_eyre::eyre::{eyre, Result};
use geojson::Geometry;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use crate::{
    geometry::{Envelope, GeoPoint, RoutePath},
    ride_geo::ToRoutePath,
};

#[derive(Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "ride_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Active,
    Full,
    Cancelled,
    Completed,
}

/// A named location with coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub point: GeoPoint,
}

/// A ride offer as the rest of the service sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    pub id: i64,
    pub driver_id: String,
    pub origin: Place,
    pub destination: Place,
    pub route: RoutePath,
    pub route_envelope: Envelope,
    //Haversine length in kilometres
    pub route_length_km: f64,
    pub departure_time: DateTime<Utc>,
    pub status: RideStatus,
    pub seats_total: i32,
    pub seats_available: i32,
    pub price_per_seat: BigDecimal,
}

//Whats actually stored in the db
pub struct NewRideRow {
    pub driver_id: String,
    pub origin: Place,
    pub destination: Place,
    pub route: Json<Geometry>,
    pub route_envelope: Envelope,
    pub route_length_km: f64,
    pub departure_time: DateTime<Utc>,
    pub seats_total: i32,
    pub price_per_seat: BigDecimal,
}

//Used when retrieving from db
#[derive(sqlx::FromRow, Debug)]
pub struct RideRow {
    pub id: i64,
    pub driver_id: String,
    pub origin_name: String,
    pub origin_address: String,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub destination_name: String,
    pub destination_address: String,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub route: Json<Geometry>,
    pub route_min_lat: f64,
    pub route_min_lng: f64,
    pub route_max_lat: f64,
    pub route_max_lng: f64,
    pub route_length_km: f64,
    pub departure_time: DateTime<Utc>,
    pub status: RideStatus,
    pub seats_total: i32,
    pub seats_available: i32,
    pub price_per_seat: BigDecimal,
}

impl TryFrom<RideRow> for Ride {
    type Error = color_eyre::eyre::Error;

    fn try_from(row: RideRow) -> Result<Self> {
        let route = row
            .route
            .0
            .to_route_path()
            .map_err(|e| eyre!("ride {} has an unreadable route: {e}", row.id))?;
        Ok(Ride {
            id: row.id,
            driver_id: row.driver_id,
            origin: Place {
                name: row.origin_name,
                address: row.origin_address,
                point: GeoPoint::new(row.origin_lat, row.origin_lng),
            },
            destination: Place {
                name: row.destination_name,
                address: row.destination_address,
                point: GeoPoint::new(row.destination_lat, row.destination_lng),
            },
            route,
            route_envelope: Envelope {
                min: GeoPoint::new(row.route_min_lat, row.route_min_lng),
                max: GeoPoint::new(row.route_max_lat, row.route_max_lng),
            },
            route_length_km: row.route_length_km,
            departure_time: row.departure_time,
            status: row.status,
            seats_total: row.seats_total,
            seats_available: row.seats_available,
            price_per_seat: row.price_per_seat,
        })
    }
}
