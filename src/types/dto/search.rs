use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    geometry::GeoPoint,
    matcher::MatchCandidate,
    types::model::ride::{Place, RideStatus},
};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub radius_km: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

/// One search result: the ride plus how far off its route the rider is.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RideMatch {
    pub id: i64,
    pub driver_id: String,
    pub origin: Place,
    pub destination: Place,
    pub departure_time: DateTime<Utc>,
    pub status: RideStatus,
    pub seats_total: i32,
    pub seats_available: i32,
    pub price_per_seat: BigDecimal,
    pub route_length_km: f64,
    pub pickup_offset_km: f64,
    pub dropoff_offset_km: f64,
}

impl From<MatchCandidate> for RideMatch {
    fn from(candidate: MatchCandidate) -> Self {
        let ride = candidate.ride;
        Self {
            id: ride.id,
            driver_id: ride.driver_id,
            origin: ride.origin,
            destination: ride.destination,
            departure_time: ride.departure_time,
            status: ride.status,
            seats_total: ride.seats_total,
            seats_available: ride.seats_available,
            price_per_seat: ride.price_per_seat,
            route_length_km: ride.route_length_km,
            pickup_offset_km: candidate.pickup_offset_km,
            dropoff_offset_km: candidate.dropoff_offset_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::candidate;

    #[test]
    fn test_request_from_camel_case() {
        let request: SearchRequest = serde_json::from_value(json!({
            "pickup": { "lat": 45.07, "lng": 7.68 },
            "dropoff": { "lat": 45.46, "lng": 9.19 },
            "radiusKm": 15.0,
            "date": "2025-06-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(request.pickup, GeoPoint::new(45.07, 7.68));
        assert_eq!(request.radius_km, Some(15.0));
        assert_eq!(request.limit, None);
        assert!(request.date.is_some());
    }

    #[test]
    fn test_match_serialization() {
        let value = serde_json::to_value(RideMatch::from(candidate(4, 1.2, 0.3, 0.0, 9.0))).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["pickupOffsetKm"], 1.2);
        assert_eq!(value["dropoffOffsetKm"], 0.3);
        assert_eq!(value["status"], "active");
        assert_eq!(value["origin"]["lat"], 0.0);
        assert!(value.get("pickupArcPositionKm").is_none());
    }
}
