use std::future::Future;

use color_eyre::eyre::Result;

use super::{CandidateQuery, RideStore};
use crate::types::model::ride::{Ride, RideStatus};

/// A fixed snapshot of rides, filtered the same way the database query is.
#[derive(Debug, Clone, Default)]
pub struct MemoryRideStore {
    rides: Vec<Ride>,
}

impl MemoryRideStore {
    pub fn new(rides: Vec<Ride>) -> Self {
        Self { rides }
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn candidates(&self, query: &CandidateQuery) -> Vec<Ride> {
        self.rides
            .iter()
            .filter(|ride| ride.status == RideStatus::Active)
            .filter(|ride| ride.departure_time >= query.departs_after)
            .filter(|ride| query.bbox.admits(ride))
            .cloned()
            .collect()
    }
}

impl RideStore for MemoryRideStore {
    fn find_candidates(
        &self,
        query: &CandidateQuery,
    ) -> impl Future<Output = Result<Vec<Ride>>> + Send {
        let rides = self.candidates(query);
        async move { Ok(rides) }
    }
}
