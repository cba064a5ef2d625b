use bigdecimal::BigDecimal;
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    geometry::{Envelope, GeoPoint, RoutePath},
    matcher::MatchCandidate,
    ride_geo::RouteGeometry,
    types::model::ride::{Place, Ride, RideStatus},
};

pub fn departure() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
}

fn place(name: &str, point: GeoPoint) -> Place {
    Place {
        name: name.to_string(),
        address: format!("{name} address"),
        point,
    }
}

/// An active ride following `points`, given as (lat, lng) pairs.
pub fn ride_along(id: i64, points: &[(f64, f64)]) -> Ride {
    let route = RoutePath::new(
        points
            .iter()
            .map(|(lat, lng)| GeoPoint::new(*lat, *lng))
            .collect(),
    );
    let first = route.points().first().copied().unwrap_or(GeoPoint::new(0.0, 0.0));
    let last = route.points().last().copied().unwrap_or(first);
    let route_envelope = route.envelope().unwrap_or(Envelope {
        min: first,
        max: first,
    });
    Ride {
        id,
        driver_id: format!("driver-{id}"),
        origin: place("origin", first),
        destination: place("destination", last),
        route_length_km: route.haversine_length_km(),
        route,
        route_envelope,
        departure_time: departure(),
        status: RideStatus::Active,
        seats_total: 3,
        seats_available: 3,
        price_per_seat: BigDecimal::from(12),
    }
}

/// A candidate with fixed metrics, skipping the projection step.
pub fn candidate(
    id: i64,
    pickup_offset_km: f64,
    dropoff_offset_km: f64,
    pickup_arc_position_km: f64,
    dropoff_arc_position_km: f64,
) -> MatchCandidate {
    MatchCandidate {
        ride: ride_along(id, &[(0.0, 0.0), (1.0, 0.0)]),
        pickup_offset_km,
        dropoff_offset_km,
        pickup_arc_position_km,
        dropoff_arc_position_km,
    }
}
