use std::sync::OnceLock;

use color_eyre::eyre::{eyre, Result};
use sqlx::{Pool, Postgres};

use crate::matcher::PrefilterMargin;

pub static DB_POOL: OnceLock<Pool<Postgres>> = OnceLock::new();
pub static PREFILTER_MARGIN: OnceLock<PrefilterMargin> = OnceLock::new();

pub fn get_db_pool() -> Result<&'static Pool<Postgres>> {
    DB_POOL.get().ok_or(eyre!("Failed to get db"))
}

pub fn get_prefilter_margin() -> PrefilterMargin {
    PREFILTER_MARGIN.get().copied().unwrap_or_default()
}
