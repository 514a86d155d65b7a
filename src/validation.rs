use chrono::{NaiveDateTime, NaiveTime};

use crate::error::{AppError, AppResult};

/// Every coach has seats numbered `1..=SEAT_CAPACITY`.
pub const SEAT_CAPACITY: i32 = 50;

const TRAVEL_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Returns the trimmed value, or `BadRequest(message)` when it is missing or blank.
pub fn require_text(value: Option<&str>, message: &str) -> AppResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::BadRequest(message.to_string())),
    }
}

/// Blank optional text is stored as NULL.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an ISO local date-time, with or without seconds.
pub fn parse_travel_date_time(value: &str) -> AppResult<NaiveDateTime> {
    let value = value.trim();
    TRAVEL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid travelDateTime '{value}', expected YYYY-MM-DDTHH:MM[:SS]"
            ))
        })
}

/// Accepts `HH:MM` or `HH:MM:SS` and returns the trimmed input.
pub fn parse_clock_time(value: Option<&str>, field: &str) -> AppResult<String> {
    let value = require_text(value, &format!("{field} is required"))?;
    let valid = NaiveTime::parse_from_str(&value, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(&value, "%H:%M:%S").is_ok();
    if !valid {
        return Err(AppError::BadRequest(format!(
            "{field} must be formatted as HH:MM"
        )));
    }
    Ok(value)
}

pub fn validate_seat_number(seat_number: i32) -> AppResult<()> {
    if !(1..=SEAT_CAPACITY).contains(&seat_number) {
        return Err(AppError::BadRequest(format!(
            "Seat number must be between 1 and {SEAT_CAPACITY}"
        )));
    }
    Ok(())
}

/// Seats in `1..=SEAT_CAPACITY` that are not in `booked`, ascending.
pub fn available_seats(booked: &[i32]) -> Vec<i32> {
    (1..=SEAT_CAPACITY)
        .filter(|seat| !booked.contains(seat))
        .collect()
}
