//! Port interface for the timeline rendering widget
//!
//! The widget draws items and the time axis. The view owns exactly one
//! widget for its lifetime and pushes items and windows into it; selection
//! reports flow back through [`crate::TimelineView::on_renderer_select`].

use calstats_domain::{DisplayInterval, Viewport};
use serde::{Deserialize, Serialize};

/// Time axis granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    Hour,
    Day,
    Month,
}

/// Position of the time axis relative to the items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrientation {
    Top,
    Bottom,
}

/// Display options applied once on mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetOptions {
    pub full_width: bool,
    /// Overlapping items go on separate rows.
    pub stack: bool,
    pub show_current_time: bool,
    pub zoom_min_ms: i64,
    pub zoom_max_ms: i64,
    pub orientation: AxisOrientation,
    pub item_margin: u32,
    pub axis_margin: u32,
    pub editable: bool,
    pub align_left: bool,
    pub zoomable: bool,
    pub utc: bool,
    pub axis_scale: AxisScale,
    pub axis_step: u32,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            full_width: true,
            stack: true,
            show_current_time: true,
            zoom_min_ms: 60 * 60 * 1000,
            zoom_max_ms: 31 * 24 * 60 * 60 * 1000,
            orientation: AxisOrientation::Top,
            item_margin: 20,
            axis_margin: 40,
            editable: false,
            align_left: true,
            zoomable: false,
            utc: true,
            axis_scale: AxisScale::Day,
            axis_step: 1,
        }
    }
}

/// Rendering collaborator driven by [`crate::TimelineView`]
///
/// Calls are synchronous and never animated.
pub trait TimelineWidget: Send {
    /// Apply display options. Called once before any items are set.
    fn configure(&mut self, options: &WidgetOptions);

    /// Replace the whole item set.
    fn set_items(&mut self, items: &[DisplayInterval]);

    /// Remove every item.
    fn clear_items(&mut self);

    /// Move the visible window.
    fn set_window(&mut self, viewport: &Viewport);
}
