//! Viewport controller
//!
//! Initializes the visible window on the calendar month of the most
//! recently starting interval, then moves it by whole months or years.
//!
//! Navigation is tracked as a signed month offset from the initialization
//! anchor rather than by repeatedly shifting the current window. Month-end
//! clamping (Jan 31 → Feb 29) is therefore never compounded, and `next`
//! followed by `previous` always lands back on the exact original bounds.

use calstats_domain::{DisplayInterval, NavDirection, NavUnit, Viewport};
use tracing::{debug, warn};

/// Tracks the visible time window of the timeline.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    anchor: Option<Viewport>,
    offset_months: i32,
    current: Option<Viewport>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current window, if one has been established.
    pub fn current(&self) -> Option<Viewport> {
        self.current
    }

    /// Signed number of months the window has moved since initialization.
    pub fn offset_months(&self) -> i32 {
        self.offset_months
    }

    /// Center the window on the month of the latest-starting interval.
    ///
    /// An empty slice leaves any existing window untouched and returns
    /// `None`.
    pub fn initialize(&mut self, intervals: &[DisplayInterval]) -> Option<Viewport> {
        let latest = intervals.iter().max_by_key(|interval| interval.start)?;
        let viewport = Viewport::month_containing(latest.start)?;

        debug!(
            latest_id = %latest.id,
            window_start = %viewport.window_start,
            window_end = %viewport.window_end,
            "viewport initialized"
        );

        self.anchor = Some(viewport);
        self.offset_months = 0;
        self.current = Some(viewport);
        Some(viewport)
    }

    /// Shift the window by one unit. No-op before initialization.
    pub fn navigate(&mut self, direction: NavDirection, unit: NavUnit) -> Option<Viewport> {
        let anchor = self.anchor?;
        let offset = self.offset_months.checked_add(direction.sign() * unit.months())?;

        let Some(viewport) = anchor.shifted_by_months(offset) else {
            warn!(%direction, %unit, offset, "viewport navigation out of range");
            return None;
        };

        self.offset_months = offset;
        self.current = Some(viewport);
        debug!(
            %direction,
            %unit,
            window_start = %viewport.window_start,
            window_end = %viewport.window_end,
            "viewport moved"
        );
        Some(viewport)
    }
}

#[cfg(test)]
mod tests {
    use calstats_domain::RawEvent;
    use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

    use super::*;
    use crate::timeline::normalize_events;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn intervals(starts: &[DateTime<Utc>]) -> Vec<DisplayInterval> {
        let events: Vec<RawEvent> = starts
            .iter()
            .enumerate()
            .map(|(idx, start)| RawEvent::new(idx as u64, format!("e{idx}"), *start, None))
            .collect();
        normalize_events(&events)
    }

    #[test]
    fn initializes_on_month_of_latest_start() {
        let mut controller = ViewportController::new();
        let set = intervals(&[utc(2023, 5, 20), utc(2024, 3, 17), utc(2022, 1, 1)]);

        let viewport = controller.initialize(&set).unwrap();

        // Latest start 2024-03-17 becomes 2024-03-01T12:00 after the offset.
        assert_eq!(viewport.window_start, utc(2024, 3, 1));
        assert_eq!(viewport.window_end, utc(2024, 4, 1) - Duration::milliseconds(1));
        assert_eq!(controller.current(), Some(viewport));
    }

    #[test]
    fn empty_set_leaves_viewport_untouched() {
        let mut controller = ViewportController::new();
        let original = controller.initialize(&intervals(&[utc(2024, 3, 17)])).unwrap();

        assert!(controller.initialize(&[]).is_none());
        assert_eq!(controller.current(), Some(original));
    }

    #[test]
    fn navigation_before_initialization_is_noop() {
        let mut controller = ViewportController::new();
        assert!(controller.navigate(NavDirection::Next, NavUnit::Month).is_none());
        assert!(controller.current().is_none());
    }

    #[test]
    fn next_then_previous_restores_bounds_exactly() {
        let mut controller = ViewportController::new();
        // January window: end is Jan 31, which clamps in February.
        let original = controller.initialize(&intervals(&[utc(2024, 2, 5)])).unwrap();
        assert_eq!(original.window_start.month(), 1);

        let forward = controller.navigate(NavDirection::Next, NavUnit::Month).unwrap();
        assert_eq!(forward.window_end.day(), 29);

        let back = controller.navigate(NavDirection::Previous, NavUnit::Month).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn clamping_does_not_accumulate_across_months() {
        let mut controller = ViewportController::new();
        controller.initialize(&intervals(&[utc(2024, 2, 5)])).unwrap();

        controller.navigate(NavDirection::Next, NavUnit::Month).unwrap();
        let march = controller.navigate(NavDirection::Next, NavUnit::Month).unwrap();

        assert_eq!(march.window_start, utc(2024, 3, 1));
        assert_eq!(march.window_end.day(), 31);
    }

    #[test]
    fn year_navigation_moves_twelve_months() {
        let mut controller = ViewportController::new();
        let original = controller.initialize(&intervals(&[utc(2024, 3, 17)])).unwrap();

        let previous = controller.navigate(NavDirection::Previous, NavUnit::Year).unwrap();
        assert_eq!(previous.window_start, utc(2023, 3, 1));
        assert_eq!(controller.offset_months(), -12);

        let restored = controller.navigate(NavDirection::Next, NavUnit::Year).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn reinitialization_resets_offset() {
        let mut controller = ViewportController::new();
        controller.initialize(&intervals(&[utc(2024, 3, 17)])).unwrap();
        controller.navigate(NavDirection::Next, NavUnit::Year).unwrap();

        let fresh = controller.initialize(&intervals(&[utc(2021, 8, 20)])).unwrap();
        assert_eq!(controller.offset_months(), 0);
        assert_eq!(fresh.window_start, utc(2021, 8, 1));
    }
}
