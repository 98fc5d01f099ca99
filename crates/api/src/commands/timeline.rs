//! Timeline navigation and selection commands

use std::time::Instant;

use calstats_domain::{CalStatsError, DisplayInterval, EventId, NavDirection, NavUnit, Result};
use tracing::debug;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// Move the visible window. Does nothing until a timeline is loaded.
pub fn navigate(ctx: &mut AppContext, direction: NavDirection, unit: NavUnit) {
    let start = Instant::now();
    match ctx.timeline_mut().navigate(direction, unit) {
        Some(viewport) => debug!(%direction, %unit, window_start = %viewport.window_start, "navigated"),
        None => debug!(%direction, %unit, "no viewport yet"),
    }
    log_command_execution("timeline::navigate", start.elapsed(), Ok(()));
}

/// Report a click on a timeline item.
///
/// Typed ids parse digits as numbers, so an id the service sent as the
/// string `"7"` is matched by its text form as well.
pub fn select_item(ctx: &mut AppContext, id: EventId) -> Result<()> {
    let start = Instant::now();
    let timeline = ctx.timeline_mut();
    let found = resolve_id(timeline.intervals(), &id);
    let result = match found {
        Some(id) => {
            timeline.on_renderer_select(std::slice::from_ref(&id));
            Ok(())
        }
        None => Err(CalStatsError::InvalidInput(format!("No timeline item with id {id}"))),
    };
    log_command_execution("timeline::select_item", start.elapsed(), result.as_ref().map(|_| ()));
    result
}

fn resolve_id(intervals: &[DisplayInterval], id: &EventId) -> Option<EventId> {
    let exact = intervals.iter().find(|interval| &interval.id == id);
    let text = id.to_string();
    exact
        .or_else(|| intervals.iter().find(|interval| interval.id.to_string() == text))
        .map(|interval| interval.id.clone())
}

/// Report an empty selection, as when clicking blank space.
pub fn deselect(ctx: &mut AppContext) {
    let start = Instant::now();
    ctx.timeline_mut().on_renderer_select(&[]);
    log_command_execution("timeline::deselect", start.elapsed(), Ok(()));
}

pub fn close_details(ctx: &mut AppContext) {
    let start = Instant::now();
    ctx.timeline_mut().close_details();
    log_command_execution("timeline::close_details", start.elapsed(), Ok(()));
}
