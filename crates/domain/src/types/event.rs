//! Calendar events as received from the analysis service and as displayed
//! on the timeline.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Event identifier.
///
/// The service emits integer ids; string ids are accepted as well so the
/// client does not care which one a given service variant uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for EventId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(trimmed.parse::<u64>().map_or_else(|_| Self::Text(trimmed.to_string()), Self::Number))
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Calendar event produced by the analysis service. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: EventId,
    pub content: String,
    #[serde(with = "super::timestamp")]
    pub start: DateTime<Utc>,
    #[serde(default, with = "super::timestamp::option", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl RawEvent {
    pub fn new(
        id: impl Into<EventId>,
        content: impl Into<String>,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        Self { id: id.into(), content: content.into(), start, end }
    }
}

/// Display-ready interval derived from a [`RawEvent`].
///
/// `start` and `end` carry the display offset; `original` keeps the record
/// the interval was derived from so detail views show source values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInterval {
    pub id: EventId,
    pub content: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub original: RawEvent,
}

impl DisplayInterval {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether any part of the interval falls inside `[from, to]`.
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start <= to && self.end >= from
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn event_ids_accept_numbers_and_strings() {
        let numeric: EventId = serde_json::from_str("7").unwrap();
        assert_eq!(numeric, EventId::Number(7));

        let text: EventId = serde_json::from_str("\"trip-7\"").unwrap();
        assert_eq!(text, EventId::Text("trip-7".into()));

        assert_eq!("7".parse::<EventId>().unwrap(), EventId::Number(7));
        assert_eq!("abc".parse::<EventId>().unwrap().to_string(), "abc");
    }

    #[test]
    fn raw_event_without_end_deserializes() {
        let event: RawEvent =
            serde_json::from_str(r#"{"id":0,"content":"lisbon","start":"2024-03-17T00:00:00+00:00"}"#)
                .unwrap();
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 3, 17, 0, 0, 0).unwrap());
        assert!(event.end.is_none());

        let blank_end: RawEvent = serde_json::from_str(
            r#"{"id":1,"content":"x","start":"2024-03-17T00:00:00Z","end":""}"#,
        )
        .unwrap();
        assert!(blank_end.end.is_none());
    }

    #[test]
    fn interval_overlap_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap();
        let interval = DisplayInterval {
            id: 1.into(),
            content: "Trip".into(),
            start,
            end,
            original: RawEvent::new(1, "Trip", start, Some(end)),
        };

        assert!(interval.overlaps(end, end + Duration::days(1)));
        assert!(!interval.overlaps(end + Duration::seconds(1), end + Duration::days(1)));
        assert_eq!(interval.duration(), Duration::days(3));
    }
}
