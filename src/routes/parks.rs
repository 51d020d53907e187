use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::extract::ApiPath;
use crate::{error::AppError, models::park::ParkDetail, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/parks", get(list_parks))
        .route("/parks/extra/:code", get(park_extra))
}

#[tracing::instrument(skip(state))]
async fn list_parks(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(Json(state.parks.list_parks().await?))
}

/// Partial upstream failures degrade to `null` sections, never an error status.
#[tracing::instrument(skip(state))]
async fn park_extra(
    State(state): State<AppState>,
    ApiPath(code): ApiPath<String>,
) -> Json<ParkDetail> {
    Json(state.aggregator.aggregate(&code).await)
}
