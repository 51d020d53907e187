pub mod aggregator;
pub mod itinerary;
pub mod nps;
pub mod store;
