use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use super::extract::{ApiJson, ApiPath};
use crate::{
    error::AppError,
    models::{
        item::{ItemPayload, ItineraryItem},
        trip::{Trip, TripPayload},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/:id", put(update_trip).delete(delete_trip))
        .route("/trips/:id/items", get(list_items).post(create_item))
        .route(
            "/trips/:id/items/:item_id",
            put(update_item).delete(delete_item),
        )
}

#[tracing::instrument(skip(state, payload))]
async fn create_trip(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TripPayload>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let trip = state.itinerary.create_trip(payload).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

#[tracing::instrument(skip(state))]
async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<Trip>>, AppError> {
    Ok(Json(state.itinerary.list_trips().await?))
}

#[tracing::instrument(skip(state, payload))]
async fn update_trip(
    State(state): State<AppState>,
    ApiPath(trip_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<TripPayload>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(state.itinerary.update_trip(trip_id, payload).await?))
}

#[tracing::instrument(skip(state))]
async fn delete_trip(
    State(state): State<AppState>,
    ApiPath(trip_id): ApiPath<i64>,
) -> Result<Json<Value>, AppError> {
    state.itinerary.delete_trip(trip_id).await?;
    Ok(Json(json!({ "ok": true })))
}

#[tracing::instrument(skip(state))]
async fn list_items(
    State(state): State<AppState>,
    ApiPath(trip_id): ApiPath<i64>,
) -> Result<Json<Vec<ItineraryItem>>, AppError> {
    Ok(Json(state.itinerary.list_items(trip_id).await?))
}

#[tracing::instrument(skip(state, payload))]
async fn create_item(
    State(state): State<AppState>,
    ApiPath(trip_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<ItemPayload>,
) -> Result<(StatusCode, Json<ItineraryItem>), AppError> {
    let item = state.itinerary.create_item(trip_id, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[tracing::instrument(skip(state, payload))]
async fn update_item(
    State(state): State<AppState>,
    ApiPath((trip_id, item_id)): ApiPath<(i64, i64)>,
    ApiJson(payload): ApiJson<ItemPayload>,
) -> Result<Json<ItineraryItem>, AppError> {
    Ok(Json(
        state
            .itinerary
            .update_item(trip_id, item_id, payload)
            .await?,
    ))
}

#[tracing::instrument(skip(state))]
async fn delete_item(
    State(state): State<AppState>,
    ApiPath((trip_id, item_id)): ApiPath<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    state.itinerary.delete_item(trip_id, item_id).await?;
    Ok(Json(json!({ "ok": true })))
}
