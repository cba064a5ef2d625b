use std::net::SocketAddr;

use axum::{
    extract::Path,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use ridelist::{
    clients::{get_db_pool, get_prefilter_margin, DB_POOL, PREFILTER_MARGIN},
    config::Config,
    net::response::{ResponseError, Result},
    ride::create_ride,
    search::{search_rides, SearchParams},
    store::postgres::PgRideStore,
    types::dto,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    init_db(&config).await?;
    PREFILTER_MARGIN
        .set(config.prefilter_margin)
        .map_err(|_| color_eyre::eyre::eyre!("Pre-filter margin already set"))?;

    let app = Router::new()
        .route("/rides", post(create))
        .route("/rides/search", post(search))
        .route("/rides/:id", get(get_ride_by_id).delete(delete_ride_by_id))
        .route("/rides/:id/status", put(update_status))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Running on {addr}");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

async fn init_db(config: &Config) -> color_eyre::Result<()> {
    info!("Connecting to db");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&db_pool).await?;
    DB_POOL
        .set(db_pool)
        .map_err(|_| color_eyre::eyre::eyre!("Db pool already set"))?;
    info!("Connected");
    Ok(())
}

#[instrument(skip(request))]
async fn search(
    Json(request): Json<dto::search::SearchRequest>,
) -> Result<Json<Vec<dto::search::RideMatch>>> {
    let params = SearchParams::from_request(request)
        .map_err(|e| ResponseError::from_search(e.into()))?;
    let store = PgRideStore::new(get_db_pool()?);
    let matches = search_rides(&store, &params, get_prefilter_margin(), Utc::now())
        .await
        .map_err(ResponseError::from_search)?;
    Ok(Json(matches.into_iter().map(Into::into).collect()))
}

#[instrument(skip(request))]
async fn create(
    Json(request): Json<dto::ride::CreateRide>,
) -> Result<Json<dto::ride::CreatedRide>> {
    let ride = create_ride(request).map_err(|e| ResponseError::bad_request(e.to_string()))?;
    let id = PgRideStore::new(get_db_pool()?).insert(&ride).await?;
    info!(id, "ride created");
    Ok(Json(dto::ride::CreatedRide { id }))
}

async fn get_ride_by_id(Path(ride_id): Path<i64>) -> Result<Json<dto::ride::RideDetail>> {
    let ride = PgRideStore::new(get_db_pool()?)
        .get(ride_id)
        .await?
        .ok_or(ResponseError::not_found("no ride with this id"))?;
    Ok(Json(ride.into()))
}

#[instrument]
async fn update_status(
    Path(ride_id): Path<i64>,
    Json(update): Json<dto::ride::StatusUpdate>,
) -> Result<()> {
    let found = PgRideStore::new(get_db_pool()?)
        .set_status(ride_id, update.status)
        .await?;
    if !found {
        return Err(ResponseError::not_found("no ride with this id"));
    }
    Ok(())
}

async fn delete_ride_by_id(Path(ride_id): Path<i64>) -> Result<()> {
    let deleted = PgRideStore::new(get_db_pool()?).delete(ride_id).await?;
    if !deleted {
        return Err(ResponseError::not_found("no ride with this id"));
    }
    Ok(())
}
