//! Analysis results produced by the companion service
//!
//! The `result` payload carries the timeline events plus day totals for the
//! rolling one-year and five-year windows. Service variants may add a
//! citizenship eligibility summary and a working-time breakdown.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::RawEvent;

/* -------------------------------------------------------------------------- */
/* Result payload */
/* -------------------------------------------------------------------------- */

/// Full `result` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Events to draw on the timeline
    #[serde(default)]
    pub timeline: Vec<RawEvent>,

    /// Days spent abroad within the last 365 days
    #[serde(default)]
    pub days_last_year: i64,

    /// Events contributing to `days_last_year`, clipped to the window
    #[serde(default)]
    pub events_last_year: Vec<WindowEvent>,

    /// Days spent abroad within the last 5 × 365 days
    #[serde(default)]
    pub days_last_5_years: i64,

    /// Events contributing to `days_last_5_years`, clipped to the window
    #[serde(default)]
    pub events_last_5_years: Vec<WindowEvent>,

    /// Eligibility summary (citizenship variant of the service)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizenship_info: Option<CitizenshipInfo>,

    /// Job name to formatted working time (working-time variant)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_time_info: Option<BTreeMap<String, serde_json::Value>>,
}

/* -------------------------------------------------------------------------- */
/* Window events */
/* -------------------------------------------------------------------------- */

/// An event clipped to a rolling statistics window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEvent {
    pub content: String,
    #[serde(with = "super::timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub end: DateTime<Utc>,
    /// Whole days of overlap with the window
    pub days: i64,
}

/* -------------------------------------------------------------------------- */
/* Eligibility */
/* -------------------------------------------------------------------------- */

/// Days abroad measured against the eligibility limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenshipInfo {
    pub days_last_5_years: i64,
    pub limit_last_5_years: i64,
    pub remaining_days_last_5_years: i64,
    pub days_last_year: i64,
    pub limit_last_year: i64,
    pub remaining_days_last_year: i64,
    /// Earliest date the user may leave without breaking eligibility
    #[serde(default, with = "super::timestamp::option", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
}
