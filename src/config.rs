use std::{env, fmt::Display, str::FromStr};

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::info;

use crate::{
    matcher::{prefilter::DEFAULT_MARGIN_DEGREES, PrefilterMargin},
    search::MAX_RADIUS_KM,
};

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub prefilter_margin: PrefilterMargin,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").ok_or(eyre!("DATABASE_URL is not set"))?;
        let margin_degrees = try_load(
            &lookup,
            "RIDELIST_PREFILTER_MARGIN_DEG",
            DEFAULT_MARGIN_DEGREES,
        )?;
        Ok(Self {
            database_url,
            port: try_load(&lookup, "RIDELIST_PORT", 3000)?,
            db_max_connections: try_load(&lookup, "RIDELIST_DB_MAX_CONNECTIONS", 5)?,
            prefilter_margin: PrefilterMargin::new(margin_degrees, MAX_RADIUS_KM)?,
        })
    }
}

fn try_load<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .wrap_err_with(|| format!("Invalid {key} value: {value}")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/ridelist")]))
                .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.prefilter_margin, PrefilterMargin::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/ridelist"),
            ("RIDELIST_PORT", "8080"),
            ("RIDELIST_PREFILTER_MARGIN_DEG", "1.2"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.prefilter_margin.degrees(), 1.2);
    }

    #[test]
    fn test_requires_database_url() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn test_rejects_margin_narrower_than_search_radius() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/ridelist"),
            ("RIDELIST_PREFILTER_MARGIN_DEG", "0.2"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unparseable_port() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/ridelist"),
            ("RIDELIST_PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }
}
