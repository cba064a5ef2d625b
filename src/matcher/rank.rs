use std::cmp::Ordering;

use super::projection::MatchCandidate;

/// How close a route has to pass, and how many matches to keep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCriteria {
    pub radius_km: f64,
    pub limit: usize,
}

/// Both rider points within the radius, and pickup before dropoff in the
/// driver's direction of travel.
pub fn is_match(candidate: &MatchCandidate, radius_km: f64) -> bool {
    candidate.pickup_offset_km <= radius_km
        && candidate.dropoff_offset_km <= radius_km
        && candidate.pickup_arc_position_km < candidate.dropoff_arc_position_km
}

/// Closest pickup first, then closest dropoff, earliest departure, lowest id.
pub fn compare(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    a.pickup_offset_km
        .total_cmp(&b.pickup_offset_km)
        .then_with(|| a.dropoff_offset_km.total_cmp(&b.dropoff_offset_km))
        .then_with(|| a.ride.departure_time.cmp(&b.ride.departure_time))
        .then_with(|| a.ride.id.cmp(&b.ride.id))
}

/// Drop non-matches, sort, then truncate to the limit.
pub fn rank(candidates: Vec<MatchCandidate>, criteria: &MatchCriteria) -> Vec<MatchCandidate> {
    let mut matches: Vec<MatchCandidate> = candidates
        .into_iter()
        .filter(|c| is_match(c, criteria.radius_km))
        .collect();
    matches.sort_by(compare);
    matches.truncate(criteria.limit);
    matches
}
