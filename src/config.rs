use std::{env, net::SocketAddr, time::Duration};

use url::Url;

use crate::{error::AppError, models::park::Category};

const DEFAULT_NPS_BASE_URL: &str = "https://developer.nps.gov/api/v1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub nps_api_key: String,
    pub nps_base_url: Url,
    pub upstream_timeout: Duration,
    pub park_list_limit: u32,
    /// Categories fanned out to by `/parks/extra/:code`.
    pub park_categories: Vec<Category>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://parktrip.db".to_string());

        let listen_addr: SocketAddr = lookup("APP_LISTEN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let nps_api_key = lookup("NPS_API_KEY").unwrap_or_default();

        let raw_base = lookup("NPS_BASE_URL").unwrap_or_else(|| DEFAULT_NPS_BASE_URL.to_string());
        let nps_base_url = Url::parse(raw_base.trim_end_matches('/'))
            .map_err(|err| AppError::Config(format!("invalid NPS_BASE_URL: {err}")))?;

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|err| {
                    AppError::Config(format!("invalid UPSTREAM_TIMEOUT_SECS: {err}"))
                })?;
                if secs == 0 {
                    return Err(AppError::Config(
                        "UPSTREAM_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(10),
        };

        let park_list_limit = match lookup("PARK_LIST_LIMIT") {
            Some(raw) => raw
                .parse()
                .map_err(|err| AppError::Config(format!("invalid PARK_LIST_LIMIT: {err}")))?,
            None => 50,
        };

        let park_categories = match lookup("PARK_CATEGORIES") {
            Some(raw) => parse_categories(&raw)?,
            None => Category::ALL.to_vec(),
        };

        Ok(Self {
            database_url,
            listen_addr,
            nps_api_key,
            nps_base_url,
            upstream_timeout,
            park_list_limit,
            park_categories,
        })
    }
}

/// Comma-separated category paths; at least one is required.
fn parse_categories(raw: &str) -> Result<Vec<Category>, AppError> {
    let categories = raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<Category>, _>>()
        .map_err(|err| AppError::Config(format!("invalid PARK_CATEGORIES: {err}")))?;
    if categories.is_empty() {
        return Err(AppError::Config(
            "PARK_CATEGORIES must name at least one category".into(),
        ));
    }
    Ok(categories)
}
