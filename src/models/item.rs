use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;

use super::{missing_fields, parse_date, parse_time, required_text};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ItineraryItem {
    pub item_id: i64,
    pub trip_id: i64,
    pub park_code: Option<String>,
    pub item_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub title: String,
    pub notes: Option<String>,
    pub sort_order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub item_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub title: String,
    pub park_code: Option<String>,
    pub notes: Option<String>,
    pub sort_order: i64,
}

/// Request body for creating or replacing an itinerary item. Optional text
/// fields sent as `""` are treated as absent.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPayload {
    pub item_date: Option<String>,
    pub title: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub park_code: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub notes: Option<String>,
    pub sort_order: Option<i64>,
}

impl ItemPayload {
    pub fn validate(self) -> Result<ItemFields, AppError> {
        let item_date = required_text(self.item_date);
        let title = required_text(self.title);

        let (Some(item_date), Some(title)) = (item_date.as_deref(), title.clone()) else {
            let mut missing = Vec::new();
            if item_date.is_none() {
                missing.push("item_date");
            }
            if title.is_none() {
                missing.push("title");
            }
            return Err(missing_fields(&missing));
        };

        let start_time = self
            .start_time
            .as_deref()
            .map(|raw| parse_time("start_time", raw))
            .transpose()?;
        let end_time = self
            .end_time
            .as_deref()
            .map(|raw| parse_time("end_time", raw))
            .transpose()?;

        Ok(ItemFields {
            item_date: parse_date("item_date", item_date)?,
            start_time,
            end_time,
            title,
            park_code: self.park_code,
            notes: self.notes,
            sort_order: self.sort_order.unwrap_or(0),
        })
    }
}
