//! Statistics cards, eligibility summary and working-time summary built
//! from an [`AnalysisResult`].

use calstats_domain::constants::{
    CARD_LAST_5_YEARS, CARD_LAST_YEAR, MSG_NO_WORKING_TIME, MSG_RETURN_DATE_PREFIX,
    MSG_WORKING_TIME_PLACEHOLDER,
};
use calstats_domain::{impl_domain_status_conversions, AnalysisResult, CitizenshipInfo, WindowEvent};
use serde_json::Value;

use crate::utils::format::{format_date, format_long_date};

/// Which rolling window a card covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    LastYear,
    Last5Years,
}

impl_domain_status_conversions!(CardKind {
    LastYear => "last-year",
    Last5Years => "last-5-years",
});

impl CardKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::LastYear => CARD_LAST_YEAR,
            Self::Last5Years => CARD_LAST_5_YEARS,
        }
    }
}

/// One expandable day-total card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub kind: CardKind,
    pub days: i64,
    pub events: Vec<WindowEvent>,
    pub expanded: bool,
}

impl StatCard {
    fn new(kind: CardKind, days: i64, events: Vec<WindowEvent>) -> Self {
        Self { kind, days, events, expanded: false }
    }

    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn indicator(&self) -> &'static str {
        if self.expanded {
            "▲"
        } else {
            "▼"
        }
    }

    pub fn headline(&self) -> String {
        format!("{} days", self.days)
    }

    /// Entry lines, present only while expanded.
    pub fn lines(&self) -> Vec<String> {
        if !self.expanded {
            return Vec::new();
        }
        self.events
            .iter()
            .map(|event| {
                format!(
                    "{} {} - {} ({} days)",
                    event.content,
                    format_date(&event.start),
                    format_date(&event.end),
                    event.days
                )
            })
            .collect()
    }
}

/// Days used against the limit for each window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilitySummary {
    pub info: CitizenshipInfo,
}

impl EligibilitySummary {
    pub fn lines(&self) -> Vec<String> {
        let info = &self.info;
        let mut lines = vec![
            format!("{}: {} / {}", CARD_LAST_5_YEARS, info.days_last_5_years, info.limit_last_5_years),
            format!("{} days remaining", info.remaining_days_last_5_years),
            format!("{}: {} / {}", CARD_LAST_YEAR, info.days_last_year, info.limit_last_year),
            format!("{} days remaining", info.remaining_days_last_year),
        ];
        if let Some(date) = &info.return_date {
            lines.push(format!("{MSG_RETURN_DATE_PREFIX} {}", format_long_date(date)));
        }
        lines
    }
}

/// Per-job working time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingTimeSummary {
    /// Nothing uploaded yet
    Pending,
    Empty,
    Jobs(Vec<(String, String)>),
}

impl WorkingTimeSummary {
    fn from_map<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> Self {
        let jobs: Vec<(String, String)> = entries
            .map(|(job, time)| {
                let time = match time {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (job.clone(), time)
            })
            .collect();
        if jobs.is_empty() {
            Self::Empty
        } else {
            Self::Jobs(jobs)
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Pending => vec![MSG_WORKING_TIME_PLACEHOLDER.to_string()],
            Self::Empty => vec![MSG_NO_WORKING_TIME.to_string()],
            Self::Jobs(jobs) => jobs.iter().map(|(job, time)| format!("{job}: {time}")).collect(),
        }
    }
}

/// Everything the statistics area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsPanel {
    pub last_year: StatCard,
    pub last_5_years: StatCard,
    pub eligibility: Option<EligibilitySummary>,
    /// `None` when the service variant does not report working time.
    pub working_time: Option<WorkingTimeSummary>,
}

impl Default for StatsPanel {
    fn default() -> Self {
        Self {
            last_year: StatCard::new(CardKind::LastYear, 0, Vec::new()),
            last_5_years: StatCard::new(CardKind::Last5Years, 0, Vec::new()),
            eligibility: None,
            working_time: Some(WorkingTimeSummary::Pending),
        }
    }
}

impl StatsPanel {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            last_year: StatCard::new(
                CardKind::LastYear,
                result.days_last_year,
                result.events_last_year.clone(),
            ),
            last_5_years: StatCard::new(
                CardKind::Last5Years,
                result.days_last_5_years,
                result.events_last_5_years.clone(),
            ),
            eligibility: result
                .citizenship_info
                .clone()
                .map(|info| EligibilitySummary { info }),
            working_time: result
                .working_time_info
                .as_ref()
                .map(|map| WorkingTimeSummary::from_map(map.iter())),
        }
    }

    pub fn card(&self, kind: CardKind) -> &StatCard {
        match kind {
            CardKind::LastYear => &self.last_year,
            CardKind::Last5Years => &self.last_5_years,
        }
    }

    /// Flip a card's expanded state, keeping the other one as is.
    pub fn toggle(&mut self, kind: CardKind) -> bool {
        match kind {
            CardKind::LastYear => self.last_year.toggle(),
            CardKind::Last5Years => self.last_5_years.toggle(),
        }
    }
}
