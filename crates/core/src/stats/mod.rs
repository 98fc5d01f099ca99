//! Statistics panel presentation model

pub mod panel;

pub use panel::{CardKind, EligibilitySummary, StatCard, StatsPanel, WorkingTimeSummary};
