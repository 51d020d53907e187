pub mod item;
pub mod park;
pub mod trip;

use chrono::{NaiveDate, NaiveTime};

use crate::error::AppError;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trims a required text field, treating blank input as absent.
pub(crate) fn required_text(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn missing_fields(fields: &[&str]) -> AppError {
    let message = match fields {
        [] => "missing required fields".to_string(),
        [only] => format!("{only} is required"),
        [init @ .., last] => format!("{} and {last} are required", init.join(", ")),
    };
    AppError::Validation(message)
}

pub(crate) fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("{field} must be a date in YYYY-MM-DD format")))
}

/// Accepts `HH:MM` as well as `HH:MM:SS`.
pub(crate) fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, AppError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| AppError::Validation(format!("{field} must be a time in HH:MM format")))
}
