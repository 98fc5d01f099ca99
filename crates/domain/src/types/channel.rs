//! Real-time channel event payloads
//!
//! Outbound: `upload {file}`. Inbound: `result <AnalysisResult>` and
//! `error {error}`. Framing lives in the infra channel adapter.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::stats::AnalysisResult;
use crate::constants::{EVENT_ERROR, EVENT_RESULT, EVENT_UPLOAD};
use crate::errors::Result;

/// Payload of the outbound `upload` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPayload {
    /// Full text contents of the selected `.ics` file
    pub file: String,
}

/// Payload of the inbound `error` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// Events the client sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    Upload(UploadPayload),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upload(_) => EVENT_UPLOAD,
        }
    }

    pub fn payload(&self) -> Result<Value> {
        match self {
            Self::Upload(payload) => Ok(serde_json::to_value(payload)?),
        }
    }
}

/// Events the client receives
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Result(Box<AnalysisResult>),
    Error(ErrorPayload),
}

impl InboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Result(_) => EVENT_RESULT,
            Self::Error(_) => EVENT_ERROR,
        }
    }

    /// Decode a named event. Unknown names yield `Ok(None)`.
    ///
    /// # Errors
    /// Returns `CalStatsError::Protocol` when a known event carries a payload
    /// of the wrong shape.
    pub fn from_named(name: &str, payload: Value) -> Result<Option<Self>> {
        match name {
            EVENT_RESULT => Ok(Some(Self::Result(Box::new(serde_json::from_value(payload)?)))),
            EVENT_ERROR => Ok(Some(Self::Error(serde_json::from_value(payload)?))),
            _ => Ok(None),
        }
    }
}
