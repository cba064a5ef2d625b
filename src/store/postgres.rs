use color_eyre::eyre::Result;
use futures::stream::TryStreamExt;
use sqlx::{postgres::PgArguments, query::QueryAs, PgPool, Postgres};
use tracing::{instrument, warn};

use super::{CandidateQuery, RideStore};
use crate::{
    matcher::CoordRange,
    types::model::ride::{NewRideRow, Ride, RideRow, RideStatus},
};

const RIDE_COLUMNS: &str = r#"id,
    driver_id,
    origin_name,
    origin_address,
    origin_lat,
    origin_lng,
    destination_name,
    destination_address,
    destination_lat,
    destination_lng,
    route,
    route_min_lat,
    route_min_lng,
    route_max_lat,
    route_max_lng,
    route_length_km,
    departure_time,
    status,
    seats_total,
    seats_available,
    price_per_seat"#;

// $2..$5 bound to the pickup range, $6..$9 to the dropoff range
const CANDIDATE_FILTER: &str = r#"status = 'active'
    and departure_time >= $1
    and (
        (origin_lat between $2 and $3 and origin_lng between $4 and $5)
        or (destination_lat between $2 and $3 and destination_lng between $4 and $5)
        or (route_min_lat <= $3 and route_max_lat >= $2 and route_min_lng <= $5 and route_max_lng >= $4)
    )
    and (
        (origin_lat between $6 and $7 and origin_lng between $8 and $9)
        or (destination_lat between $6 and $7 and destination_lng between $8 and $9)
        or (route_min_lat <= $7 and route_max_lat >= $6 and route_min_lng <= $9 and route_max_lng >= $8)
    )"#;

pub struct PgRideStore<'a> {
    pool: &'a PgPool,
}

fn bind_range<'q>(
    query: QueryAs<'q, Postgres, RideRow, PgArguments>,
    range: &CoordRange,
) -> QueryAs<'q, Postgres, RideRow, PgArguments> {
    query
        .bind(range.min_lat)
        .bind(range.max_lat)
        .bind(range.min_lng)
        .bind(range.max_lng)
}

impl<'a> PgRideStore<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, ride), fields(driver_id = %ride.driver_id))]
    pub async fn insert(&self, ride: &NewRideRow) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"insert into rides (
            driver_id,
            origin_name, origin_address, origin_lat, origin_lng,
            destination_name, destination_address, destination_lat, destination_lng,
            route, route_min_lat, route_min_lng, route_max_lat, route_max_lng, route_length_km,
            departure_time, seats_total, seats_available, price_per_seat
        )
        values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $17, $18)
        returning id"#,
        )
        .bind(&ride.driver_id)
        .bind(&ride.origin.name)
        .bind(&ride.origin.address)
        .bind(ride.origin.point.lat)
        .bind(ride.origin.point.lng)
        .bind(&ride.destination.name)
        .bind(&ride.destination.address)
        .bind(ride.destination.point.lat)
        .bind(ride.destination.point.lng)
        .bind(&ride.route)
        .bind(ride.route_envelope.min.lat)
        .bind(ride.route_envelope.min.lng)
        .bind(ride.route_envelope.max.lat)
        .bind(ride.route_envelope.max.lng)
        .bind(ride.route_length_km)
        .bind(ride.departure_time)
        .bind(ride.seats_total)
        .bind(&ride.price_per_seat)
        .fetch_one(self.pool)
        .await?;
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Ride>> {
        let sql = format!("select {RIDE_COLUMNS} from rides where id = $1");
        let row = sqlx::query_as::<_, RideRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        row.map(Ride::try_from).transpose()
    }

    /// Returns whether a ride with this id existed.
    pub async fn set_status(&self, id: i64, status: RideStatus) -> Result<bool> {
        let result = sqlx::query("update rides set status = $1 where id = $2")
            .bind(status)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns whether a ride with this id existed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("delete from rides where id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl RideStore for PgRideStore<'_> {
    #[instrument(skip(self))]
    async fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<Ride>> {
        let sql = format!("select {RIDE_COLUMNS} from rides where {CANDIDATE_FILTER}");
        let rides = bind_range(
            bind_range(
                sqlx::query_as::<_, RideRow>(&sql).bind(query.departs_after),
                &query.bbox.pickup,
            ),
            &query.bbox.dropoff,
        )
        .fetch(self.pool)
        .try_filter_map(|row| async move {
            // unreadable routes are skipped, not fatal to the search
            Ok(Ride::try_from(row)
                .map_err(|e| warn!(error = %e, "skipping stored ride"))
                .ok())
        })
        .try_collect::<Vec<Ride>>()
        .await?;
        Ok(rides)
    }
}
