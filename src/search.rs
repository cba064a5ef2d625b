use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    geometry::GeoPoint,
    matcher::{
        match_rides, BoundingBoxFilter, MatchCandidate, MatchCriteria, PrefilterMargin, RiderTrip,
    },
    store::{CandidateQuery, RideStore},
    types::dto::search::SearchRequest,
};

pub const DEFAULT_RADIUS_KM: f64 = 10.0;
pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 50.0;
pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 50;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidRequest {
    #[error("{field} latitude {value} is outside [-90, 90]")]
    Latitude { field: &'static str, value: f64 },
    #[error("{field} longitude {value} is outside [-180, 180]")]
    Longitude { field: &'static str, value: f64 },
    #[error("radiusKm {0} is outside [1, 50]")]
    Radius(f64),
    #[error("limit {0} is outside [1, 50]")]
    Limit(i64),
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid request: {0}")]
    Invalid(#[from] InvalidRequest),
    #[error("search failed")]
    Storage(color_eyre::eyre::Report),
}

impl SearchError {
    pub fn status(&self) -> StatusCode {
        match self {
            SearchError::Invalid(_) => StatusCode::BAD_REQUEST,
            SearchError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A validated search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub trip: RiderTrip,
    pub radius_km: f64,
    pub date: Option<DateTime<Utc>>,
    pub limit: usize,
}

pub(crate) fn check_point(
    field: &'static str,
    point: GeoPoint,
) -> Result<GeoPoint, InvalidRequest> {
    if !point.lat.is_finite() || !(-90.0..=90.0).contains(&point.lat) {
        return Err(InvalidRequest::Latitude {
            field,
            value: point.lat,
        });
    }
    if !point.lng.is_finite() || !(-180.0..=180.0).contains(&point.lng) {
        return Err(InvalidRequest::Longitude {
            field,
            value: point.lng,
        });
    }
    Ok(point)
}

impl SearchParams {
    pub fn from_request(request: SearchRequest) -> Result<Self, InvalidRequest> {
        let pickup = check_point("pickup", request.pickup)?;
        let dropoff = check_point("dropoff", request.dropoff)?;

        let radius_km = request.radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius_km) {
            return Err(InvalidRequest::Radius(radius_km));
        }

        let limit = match request.limit {
            None => DEFAULT_LIMIT,
            Some(limit) if (1..=MAX_LIMIT as i64).contains(&limit) => limit as usize,
            Some(limit) => return Err(InvalidRequest::Limit(limit)),
        };

        Ok(Self {
            trip: RiderTrip { pickup, dropoff },
            radius_km,
            date: request.date,
            limit,
        })
    }

    pub fn criteria(&self) -> MatchCriteria {
        MatchCriteria {
            radius_km: self.radius_km,
            limit: self.limit,
        }
    }

    /// The storage query, with `now` standing in for a missing date.
    pub fn candidate_query(&self, margin: PrefilterMargin, now: DateTime<Utc>) -> CandidateQuery {
        CandidateQuery {
            departs_after: self.date.unwrap_or(now),
            bbox: BoundingBoxFilter::around(self.trip.pickup, self.trip.dropoff, margin),
        }
    }
}

/// Fetch candidates for `params` and rank them.
///
/// `now` is only used when the search has no date of its own.
pub async fn search_rides<S>(
    store: &S,
    params: &SearchParams,
    margin: PrefilterMargin,
    now: DateTime<Utc>,
) -> Result<Vec<MatchCandidate>, SearchError>
where
    S: RideStore + Sync,
{
    let query = params.candidate_query(margin, now);
    let rides = store.find_candidates(&query).await.map_err(|e| {
        error!(error = ?e, "failed to fetch candidate rides");
        SearchError::Storage(e)
    })?;
    let candidates = rides.len();
    let matches = match_rides(rides, &params.trip, &params.criteria());
    debug!(candidates, matches = matches.len(), "ride search finished");
    Ok(matches)
}
