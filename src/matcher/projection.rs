use crate::{
    geometry::{round_km, GeoPoint, PathError},
    types::model::ride::Ride,
};

/// A rider's requested pickup and dropoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiderTrip {
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
}

/// A ride together with how the rider's trip sits on its route.
///
/// All four metrics are in kilometres, rounded to one decimal place.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub ride: Ride,
    pub pickup_offset_km: f64,
    pub dropoff_offset_km: f64,
    pub pickup_arc_position_km: f64,
    pub dropoff_arc_position_km: f64,
}

/// Project both rider points onto the ride's route.
///
/// Fails only when the route is not a usable polyline. The ride record is
/// moved into the candidate untouched.
pub fn project(ride: Ride, trip: &RiderTrip) -> Result<MatchCandidate, PathError> {
    let polyline = ride.route.to_polyline()?;
    let pickup = polyline.project(trip.pickup);
    let dropoff = polyline.project(trip.dropoff);
    Ok(MatchCandidate {
        ride,
        pickup_offset_km: round_km(pickup.offset_km),
        dropoff_offset_km: round_km(dropoff.offset_km),
        pickup_arc_position_km: round_km(pickup.arc_position_km),
        dropoff_arc_position_km: round_km(dropoff.arc_position_km),
    })
}
