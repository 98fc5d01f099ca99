//! Visible timeline window and the vocabulary used to move it.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Visible time range of the timeline widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

impl Viewport {
    pub fn new(window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Self {
        Self { window_start, window_end }
    }

    /// Full calendar month containing `instant`: first millisecond of day 1
    /// through the last millisecond of the final day.
    pub fn month_containing(instant: DateTime<Utc>) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(instant.year(), instant.month(), 1)?;
        let window_start = first_day.and_hms_opt(0, 0, 0)?.and_utc();
        let next_month = window_start.checked_add_months(Months::new(1))?;
        Some(Self { window_start, window_end: next_month - Duration::milliseconds(1) })
    }

    /// Both bounds moved by `months` calendar months (negative moves back).
    ///
    /// Day-of-month clamps to the target month's length, so the span is not
    /// preserved across months of different lengths.
    pub fn shifted_by_months(&self, months: i32) -> Option<Self> {
        Some(Self {
            window_start: shift_months(self.window_start, months)?,
            window_end: shift_months(self.window_end, months)?,
        })
    }

    pub fn span(&self) -> Duration {
        self.window_end - self.window_start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.window_start <= instant && instant <= self.window_end
    }
}

fn shift_months(instant: DateTime<Utc>, months: i32) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(months.unsigned_abs());
    if months >= 0 {
        instant.checked_add_months(magnitude)
    } else {
        instant.checked_sub_months(magnitude)
    }
}

/// Navigation direction for the timeline window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    Previous,
    Next,
}

impl_domain_status_conversions!(NavDirection {
    Previous => "previous",
    Next => "next",
});

impl NavDirection {
    /// +1 for forward, -1 for backward.
    pub fn sign(self) -> i32 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Calendar unit the window moves by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavUnit {
    Month,
    Year,
}

impl_domain_status_conversions!(NavUnit {
    Month => "month",
    Year => "year",
});

impl NavUnit {
    pub fn months(self) -> i32 {
        match self {
            Self::Month => 1,
            Self::Year => 12,
        }
    }
}
