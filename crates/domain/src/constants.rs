//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Display offset applied to every timeline interval. Fixed, not configurable.
pub const DISPLAY_OFFSET_DAYS: i64 = 16;
pub const DISPLAY_OFFSET_HOURS: i64 = 12;

// Real-time channel event names
pub const EVENT_UPLOAD: &str = "upload";
pub const EVENT_RESULT: &str = "result";
pub const EVENT_ERROR: &str = "error";

// Channel defaults
pub const DEFAULT_CHANNEL_URL: &str = "http://localhost:5001";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const SOCKET_IO_PATH: &str = "socket.io/";

// File input
pub const ICS_EXTENSION: &str = "ics";

// User-facing messages
pub const MSG_NO_FILE_SELECTED: &str = "Please select a file first.";
pub const MSG_CHANNEL_NOT_CONNECTED: &str = "Socket not connected. Please try again.";
pub const MSG_NO_TIMELINE_DATA: &str = "No data available to display the timeline.";
pub const MSG_NO_WORKING_TIME: &str = "No recurring work-related events found in the calendar.";
pub const MSG_WORKING_TIME_PLACEHOLDER: &str =
    "Upload a calendar file to see your work time analysis.";
pub const MSG_RETURN_DATE_PREFIX: &str = "To remain eligible, you must not leave the UK before:";

// Panel titles
pub const TIMELINE_TITLE: &str = "Overseas Trips Timeline";
pub const CARD_LAST_YEAR: &str = "Last Year";
pub const CARD_LAST_5_YEARS: &str = "Last 5 Years";
