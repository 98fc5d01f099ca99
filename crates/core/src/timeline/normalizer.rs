//! Event normalization
//!
//! Every event is moved by a fixed display offset (16 days back, 12 hours
//! forward) applied to both bounds, so durations are preserved. An end that
//! lands exactly on midnight is pulled back one millisecond so the interval
//! finishes on the previous day instead of spilling into the next one. The
//! correction never moves the end before the start: zero-length intervals
//! stay zero-length.

use calstats_domain::constants::{DISPLAY_OFFSET_DAYS, DISPLAY_OFFSET_HOURS};
use calstats_domain::{DisplayInterval, RawEvent};
use chrono::{DateTime, Duration, Timelike, Utc};

/// Normalize a batch of events. Same length, same order.
pub fn normalize_events(events: &[RawEvent]) -> Vec<DisplayInterval> {
    events.iter().map(normalize_event).collect()
}

/// Normalize a single event.
pub fn normalize_event(event: &RawEvent) -> DisplayInterval {
    let start = apply_display_offset(event.start);
    let mut end = apply_display_offset(event.end.unwrap_or(event.start));

    if is_midnight(end) && end > start {
        end -= Duration::milliseconds(1);
    }

    DisplayInterval {
        id: event.id.clone(),
        content: event.content.clone(),
        start,
        end,
        original: event.clone(),
    }
}

/// `instant - 16 days + 12 hours`, in UTC.
pub fn apply_display_offset(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant - Duration::days(DISPLAY_OFFSET_DAYS) + Duration::hours(DISPLAY_OFFSET_HOURS)
}

/// Exactly 00:00:00.000 UTC.
fn is_midnight(instant: DateTime<Utc>) -> bool {
    instant.num_seconds_from_midnight() == 0 && instant.nanosecond() == 0
}
