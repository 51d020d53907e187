use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{missing_fields, parse_date, required_text};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub trip_id: i64,
    pub trip_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Validated mutable fields of a trip, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripFields {
    pub trip_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request body for `POST /trips` and `PUT /trips/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripPayload {
    pub trip_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TripPayload {
    /// Both dates must parse; their relative order is not checked.
    pub fn validate(self) -> Result<TripFields, AppError> {
        let trip_name = required_text(self.trip_name);
        let start_date = required_text(self.start_date);
        let end_date = required_text(self.end_date);

        let mut missing = Vec::new();
        if trip_name.is_none() {
            missing.push("trip_name");
        }
        if start_date.is_none() {
            missing.push("start_date");
        }
        if end_date.is_none() {
            missing.push("end_date");
        }
        let (Some(trip_name), Some(start_date), Some(end_date)) = (trip_name, start_date, end_date)
        else {
            return Err(missing_fields(&missing));
        };

        Ok(TripFields {
            trip_name,
            start_date: parse_date("start_date", &start_date)?,
            end_date: parse_date("end_date", &end_date)?,
        })
    }
}
