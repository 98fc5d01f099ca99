//! Selection state machine and the detail overlay it drives.
//!
//! `Idle → Active(id)` on a reported selection, `Active(x) → Active(y)`
//! directly when a different item is picked, and back to `Idle` on an empty
//! report or an explicit close.

use calstats_domain::{DisplayInterval, EventId, Selection};
use tracing::debug;

use crate::utils::format::format_timestamp;

/// Tracks which interval, if any, is open for detail display.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    state: Selection,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    /// Apply a selection report from the renderer.
    ///
    /// The renderer may report several ids; the first one wins.
    pub fn on_renderer_select(&mut self, ids: &[EventId]) -> &Selection {
        self.state = match ids.first() {
            Some(id) => Selection::Active(id.clone()),
            None => Selection::Idle,
        };
        debug!(selection = ?self.state, "selection changed");
        &self.state
    }

    /// User dismissed the detail overlay.
    pub fn close(&mut self) -> &Selection {
        self.state = Selection::Idle;
        &self.state
    }

    /// Detail overlay for the active interval, looked up in `intervals`.
    pub fn detail(&self, intervals: &[DisplayInterval]) -> Option<EventDetail> {
        let id = self.state.selected_id()?;
        intervals.iter().find(|interval| &interval.id == id).map(EventDetail::from_interval)
    }
}

/// What the detail overlay shows: label plus the *original* start and end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub id: EventId,
    pub title: String,
    pub start: String,
    /// Absent when the source record had no end.
    pub end: Option<String>,
}

impl EventDetail {
    pub fn from_interval(interval: &DisplayInterval) -> Self {
        let original = &interval.original;
        Self {
            id: original.id.clone(),
            title: original.content.clone(),
            start: format_timestamp(&original.start),
            end: original.end.as_ref().map(format_timestamp),
        }
    }
}
