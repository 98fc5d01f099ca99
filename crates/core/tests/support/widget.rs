use calstats_core::{TimelineWidget, WidgetOptions};
use calstats_domain::{DisplayInterval, Viewport};

/// Every call the view made on its widget, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCall {
    Configure(WidgetOptions),
    SetItems(Vec<DisplayInterval>),
    ClearItems,
    SetWindow(Viewport),
}

#[derive(Debug, Default)]
pub struct RecordingWidget {
    pub calls: Vec<WidgetCall>,
}

impl RecordingWidget {
    pub fn windows(&self) -> Vec<Viewport> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                WidgetCall::SetWindow(viewport) => Some(*viewport),
                _ => None,
            })
            .collect()
    }

    pub fn last_items(&self) -> Option<&[DisplayInterval]> {
        self.calls.iter().rev().find_map(|call| match call {
            WidgetCall::SetItems(items) => Some(items.as_slice()),
            _ => None,
        })
    }
}

impl TimelineWidget for RecordingWidget {
    fn configure(&mut self, options: &WidgetOptions) {
        self.calls.push(WidgetCall::Configure(options.clone()));
    }

    fn set_items(&mut self, items: &[DisplayInterval]) {
        self.calls.push(WidgetCall::SetItems(items.to_vec()));
    }

    fn clear_items(&mut self) {
        self.calls.push(WidgetCall::ClearItems);
    }

    fn set_window(&mut self, viewport: &Viewport) {
        self.calls.push(WidgetCall::SetWindow(*viewport));
    }
}
