//! Character-cell timeline renderer
//!
//! One column per day of the visible window, one line per stacked row.
//! Overlapping items go to separate rows when stacking is enabled.
//!
//! ```text
//! March 2024
//!       1234567890123456789012345678901
//! row 1 ####.........................##  [1] Paris, [4] Oslo
//! ```

use calstats_core::{TimelineWidget, WidgetOptions};
use calstats_domain::constants::TIMELINE_TITLE;
use calstats_domain::{DisplayInterval, Viewport};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use tracing::trace;

const ROW_LABEL_WIDTH: usize = 6;

#[derive(Debug, Default)]
pub struct TextTimelineWidget {
    options: Option<WidgetOptions>,
    items: Vec<DisplayInterval>,
    window: Option<Viewport>,
}

impl TextTimelineWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> Option<&WidgetOptions> {
        self.options.as_ref()
    }

    pub fn items(&self) -> &[DisplayInterval] {
        &self.items
    }

    pub fn window(&self) -> Option<Viewport> {
        self.window
    }

    /// Draw the current window. Empty when there is no window yet.
    pub fn render(&self) -> String {
        let Some(window) = self.window else {
            return String::new();
        };
        let days = day_starts(&window);
        let mut out = format!("{TIMELINE_TITLE}: {}\n", window.window_start.format("%B %Y"));

        let ruler: String = days
            .iter()
            .map(|day| char::from_digit(day.day() % 10, 10).unwrap_or(' '))
            .collect();
        out.push_str(&format!("{:width$}{ruler}\n", "", width = ROW_LABEL_WIDTH));

        let visible: Vec<&DisplayInterval> = self
            .items
            .iter()
            .filter(|item| item.overlaps(window.window_start, window.window_end))
            .collect();
        let stack = self.options.as_ref().map_or(true, |options| options.stack);

        for (index, row) in assign_rows(&visible, stack).iter().enumerate() {
            let bar: String = days
                .iter()
                .map(|day| {
                    let day_end = *day + Duration::days(1) - Duration::milliseconds(1);
                    if row.iter().any(|item| item.overlaps(*day, day_end)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            let labels: Vec<String> =
                row.iter().map(|item| format!("[{}] {}", item.id, item.content)).collect();
            out.push_str(&format!(
                "{:<width$}{bar}  {}\n",
                format!("row {}", index + 1),
                labels.join(", "),
                width = ROW_LABEL_WIDTH
            ));
        }

        let hidden = self.items.len() - visible.len();
        if hidden > 0 {
            out.push_str(&format!("({hidden} more outside this window)\n"));
        }
        out
    }
}

impl TimelineWidget for TextTimelineWidget {
    fn configure(&mut self, options: &WidgetOptions) {
        trace!(?options, "text widget configured");
        self.options = Some(options.clone());
    }

    fn set_items(&mut self, items: &[DisplayInterval]) {
        self.items = items.to_vec();
    }

    fn clear_items(&mut self) {
        self.items.clear();
    }

    fn set_window(&mut self, viewport: &Viewport) {
        self.window = Some(*viewport);
    }
}

/// Midnight of every day touched by the window.
fn day_starts(window: &Viewport) -> Vec<DateTime<Utc>> {
    let mut day = window.window_start.date_naive().and_time(NaiveTime::MIN).and_utc();
    let mut days = Vec::new();
    while day <= window.window_end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// Greedy first-fit: each item goes to the first row whose last item ended
/// before it starts.
fn assign_rows<'a>(items: &[&'a DisplayInterval], stack: bool) -> Vec<Vec<&'a DisplayInterval>> {
    if !stack {
        return if items.is_empty() { Vec::new() } else { vec![items.to_vec()] };
    }

    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| item.start);

    let mut rows: Vec<Vec<&DisplayInterval>> = Vec::new();
    for item in sorted {
        let free = rows
            .iter_mut()
            .find(|row| row.last().is_some_and(|last| last.end < item.start));
        match free {
            Some(row) => row.push(item),
            None => rows.push(vec![item]),
        }
    }
    rows
}
