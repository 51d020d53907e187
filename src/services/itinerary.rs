use tracing::info;

use crate::{
    error::AppError,
    models::{
        item::{ItemPayload, ItineraryItem},
        trip::{Trip, TripPayload},
    },
    services::store::ItineraryStore,
};

/// Request-level trip and item operations. Payloads are validated here, so a
/// rejected request never reaches the store.
#[derive(Clone)]
pub struct ItineraryService {
    store: ItineraryStore,
}

impl ItineraryService {
    pub fn new(store: ItineraryStore) -> Self {
        Self { store }
    }

    pub async fn create_trip(&self, payload: TripPayload) -> Result<Trip, AppError> {
        let fields = payload.validate()?;
        let trip = self.store.create_trip(&fields).await?;
        info!(trip_id = trip.trip_id, trip_name = %trip.trip_name, "trip saved");
        Ok(trip)
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        self.store.list_trips().await
    }

    pub async fn update_trip(&self, trip_id: i64, payload: TripPayload) -> Result<Trip, AppError> {
        let fields = payload.validate()?;
        self.store.update_trip(trip_id, &fields).await
    }

    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), AppError> {
        self.store.delete_trip(trip_id).await?;
        info!(trip_id, "trip deleted");
        Ok(())
    }

    pub async fn list_items(&self, trip_id: i64) -> Result<Vec<ItineraryItem>, AppError> {
        self.store.list_items(trip_id).await
    }

    pub async fn create_item(
        &self,
        trip_id: i64,
        payload: ItemPayload,
    ) -> Result<ItineraryItem, AppError> {
        let fields = payload.validate()?;
        self.store.create_item(trip_id, &fields).await
    }

    pub async fn update_item(
        &self,
        trip_id: i64,
        item_id: i64,
        payload: ItemPayload,
    ) -> Result<ItineraryItem, AppError> {
        let fields = payload.validate()?;
        self.store.update_item(trip_id, item_id, &fields).await
    }

    pub async fn delete_item(&self, trip_id: i64, item_id: i64) -> Result<(), AppError> {
        self.store.delete_item(trip_id, item_id).await
    }
}
