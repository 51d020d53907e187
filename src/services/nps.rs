use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    config::AppConfig,
    error::{AppError, FetchError, FetchErrorKind},
    models::park::Category,
};

const PARKS_RESOURCE: &str = "parks";

/// Read-only access to the upstream park data provider.
#[async_trait]
pub trait ParkDataSource: Send + Sync {
    /// One request for one category of one park. Always returns a tagged
    /// result; failures are classified, never raised.
    async fn fetch_category(&self, category: Category, park_code: &str)
        -> Result<Value, FetchError>;

    /// Summary list of parks (the `data` array of the upstream response).
    async fn list_parks(&self) -> Result<Value, FetchError>;
}

#[derive(Clone)]
pub struct NpsClient {
    http: Client,
    base_url: Url,
    api_key: String,
    park_list_limit: u32,
}

impl NpsClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.nps_base_url.clone(),
            api_key: config.nps_api_key.clone(),
            park_list_limit: config.park_list_limit,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn get_json(
        &self,
        resource: &'static str,
        query: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        let url = self.endpoint(resource);
        debug!(%url, "requesting upstream resource");

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| FetchError::new(resource, FetchErrorKind::Transport(err.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                resource,
                FetchErrorKind::Status(status.as_u16()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::new(resource, FetchErrorKind::Transport(err.to_string())))?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(resource, FetchErrorKind::Decode(err.to_string())))
    }
}

#[async_trait]
impl ParkDataSource for NpsClient {
    async fn fetch_category(
        &self,
        category: Category,
        park_code: &str,
    ) -> Result<Value, FetchError> {
        self.get_json(category.path(), &[("parkCode", park_code.to_string())])
            .await
    }

    async fn list_parks(&self) -> Result<Value, FetchError> {
        let mut body = self
            .get_json(
                PARKS_RESOURCE,
                &[("limit", self.park_list_limit.to_string())],
            )
            .await?;
        match body.get_mut("data") {
            Some(data) => Ok(data.take()),
            None => Err(FetchError::new(
                PARKS_RESOURCE,
                FetchErrorKind::Decode("response has no `data` field".into()),
            )),
        }
    }
}
