//! Date formatting for detail overlays and statistics cards.

use chrono::{DateTime, Datelike, Utc};

/// Full timestamp, e.g. `2024-03-17 14:05:00 UTC`.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Calendar date, e.g. `2024-03-17`.
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Long date with ordinal day, e.g. `June 1st, 2025`.
pub fn format_long_date(value: &DateTime<Utc>) -> String {
    let day = value.day();
    format!("{} {}{}, {}", value.format("%B"), day, ordinal_suffix(day), value.year())
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
