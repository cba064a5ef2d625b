use std::future::Future;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;

use crate::{matcher::BoundingBoxFilter, types::model::ride::Ride};

pub mod memory;
pub mod postgres;

/// What storage must select before the exact match runs: active rides
/// departing at or after `departs_after` that the bounding box admits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateQuery {
    pub departs_after: DateTime<Utc>,
    pub bbox: BoundingBoxFilter,
}

pub trait RideStore {
    fn find_candidates(
        &self,
        query: &CandidateQuery,
    ) -> impl Future<Output = Result<Vec<Ride>>> + Send;
}
