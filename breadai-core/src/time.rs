//! Timestamp and calendar-date utilities

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc, Weekday};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Get today's calendar date in the device's local timezone
///
/// Bake logging and streaks are calendar-day concepts for the user, so they
/// use local time rather than UTC.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether a date falls on Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
