use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Upstream(#[from] FetchError),
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Upstream(err) => {
                error!(error = %err, "upstream request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch parks".to_string(),
                )
            }
            AppError::Database(err) => {
                error!(error = ?err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::Migration(_)
            | AppError::Http(_) => {
                error!(error = %self, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Failure of a single upstream request. Never escapes the aggregator; the
/// park list passthrough is the only caller that surfaces it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to fetch {resource}: {kind}")]
pub struct FetchError {
    pub resource: &'static str,
    pub kind: FetchErrorKind,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchErrorKind {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream responded with status {0}")]
    Status(u16),
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    pub fn new(resource: &'static str, kind: FetchErrorKind) -> Self {
        Self { resource, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_bad_request_with_message() {
        let response = AppError::Validation("title is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "title is required");
    }

    #[tokio::test]
    async fn not_found_names_the_resource() {
        let response = AppError::NotFound("item").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "item not found");
    }

    #[tokio::test]
    async fn database_cause_is_not_exposed() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "internal server error");
    }

    #[test]
    fn fetch_error_display_names_resource_and_reason() {
        let err = FetchError::new("alerts", FetchErrorKind::Status(503));
        assert_eq!(
            err.to_string(),
            "failed to fetch alerts: upstream responded with status 503"
        );
    }
}
