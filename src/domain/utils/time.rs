// src/domain/utils/time.rs
use chrono::{DateTime, Utc};

/// Timestamp format used throughout the store: `YYYY-MM-DD HH:MM:SS`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats an instant the way the store expects (`createdAt`, log
/// timestamps). The caller supplies the instant; the domain module never
/// reads the clock itself.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(DATETIME_FORMAT).to_string()
}
