use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::DbPool,
    services::{
        aggregator::Aggregator, itinerary::ItineraryService, nps::ParkDataSource,
        store::ItineraryStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub itinerary: ItineraryService,
    pub parks: Arc<dyn ParkDataSource>,
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(config: &AppConfig, db: DbPool, parks: Arc<dyn ParkDataSource>) -> Self {
        let itinerary = ItineraryService::new(ItineraryStore::new(db.clone()));
        let aggregator = Aggregator::new(Arc::clone(&parks), &config.park_categories);
        Self {
            db,
            itinerary,
            parks,
            aggregator,
        }
    }
}
