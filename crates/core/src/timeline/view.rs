//! Timeline view: normalizer, viewport and selection composed over one
//! exclusively owned rendering widget.

use std::sync::Arc;

use calstats_domain::constants::MSG_NO_TIMELINE_DATA;
use calstats_domain::{
    DisplayInterval, EventId, NavDirection, NavUnit, RawEvent, Selection, Viewport,
};
use tracing::{debug, info};

use super::normalizer::normalize_events;
use super::ports::{TimelineWidget, WidgetOptions};
use super::selection::{EventDetail, SelectionTracker};
use super::viewport::ViewportController;

/// Interactive timeline bound to a widget `W`.
pub struct TimelineView<W: TimelineWidget> {
    widget: W,
    data: Option<Arc<[RawEvent]>>,
    intervals: Vec<DisplayInterval>,
    viewport: ViewportController,
    selection: SelectionTracker,
}

impl<W: TimelineWidget> TimelineView<W> {
    /// Mount the view, configuring the widget with the default options.
    pub fn mount(widget: W) -> Self {
        Self::mount_with_options(widget, &WidgetOptions::default())
    }

    pub fn mount_with_options(mut widget: W, options: &WidgetOptions) -> Self {
        widget.configure(options);
        Self {
            widget,
            data: None,
            intervals: Vec::new(),
            viewport: ViewportController::new(),
            selection: SelectionTracker::new(),
        }
    }

    /// Feed a new upstream data set.
    ///
    /// The same `Arc` as last time is ignored. Anything else is a full
    /// replace: items are rebuilt, the viewport is reinitialized and the
    /// selection is dropped. Returns whether the widget was touched.
    pub fn set_data(&mut self, events: Arc<[RawEvent]>) -> bool {
        if self.data.as_ref().is_some_and(|current| Arc::ptr_eq(current, &events)) {
            debug!("timeline data unchanged, skipping rebuild");
            return false;
        }

        let had_items = !self.intervals.is_empty();
        self.intervals = normalize_events(&events);
        self.data = Some(events);
        self.selection.close();

        if self.intervals.is_empty() {
            if had_items {
                self.widget.clear_items();
            }
            debug!("timeline data empty");
            return true;
        }

        self.widget.set_items(&self.intervals);
        if let Some(viewport) = self.viewport.initialize(&self.intervals) {
            self.widget.set_window(&viewport);
        }
        info!(items = self.intervals.len(), "timeline rebuilt");
        true
    }

    /// Move the window and push it to the widget.
    pub fn navigate(&mut self, direction: NavDirection, unit: NavUnit) -> Option<Viewport> {
        let viewport = self.viewport.navigate(direction, unit)?;
        self.widget.set_window(&viewport);
        Some(viewport)
    }

    /// Selection callback from the widget.
    pub fn on_renderer_select(&mut self, ids: &[EventId]) -> &Selection {
        self.selection.on_renderer_select(ids)
    }

    /// User closed the detail overlay.
    pub fn close_details(&mut self) -> &Selection {
        self.selection.close()
    }

    pub fn selection(&self) -> &Selection {
        self.selection.state()
    }

    pub fn detail(&self) -> Option<EventDetail> {
        self.selection.detail(&self.intervals)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport.current()
    }

    pub fn intervals(&self) -> &[DisplayInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Placeholder text while there is nothing to draw.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(MSG_NO_TIMELINE_DATA)
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Tear the view down and hand the widget back.
    pub fn into_widget(self) -> W {
        debug!("timeline view released widget");
        self.widget
    }
}
