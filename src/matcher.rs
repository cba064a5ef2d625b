//! Route-proximity matching of rider trips against driver rides.
//!
//! Storage narrows rides with [`prefilter::BoundingBoxFilter`], then
//! [`match_rides`] projects the rider's points onto each route and ranks the
//! rides that pass near both points in the right order.

pub mod prefilter;
pub mod projection;
pub mod rank;

use tracing::warn;

pub use prefilter::{BoundingBoxFilter, CoordRange, PrefilterMargin};
pub use projection::{project, MatchCandidate, RiderTrip};
pub use rank::{rank, MatchCriteria};

use crate::types::model::ride::Ride;

/// Project every ride, skip the ones whose route cannot be projected onto,
/// and rank the rest.
pub fn match_rides<I>(rides: I, trip: &RiderTrip, criteria: &MatchCriteria) -> Vec<MatchCandidate>
where
    I: IntoIterator<Item = Ride>,
{
    let candidates = rides
        .into_iter()
        .filter_map(|ride| {
            let ride_id = ride.id;
            project(ride, trip)
                .map_err(|e| warn!(ride_id, error = %e, "skipping ride with unusable route"))
                .ok()
        })
        .collect();
    rank(candidates, criteria)
}
