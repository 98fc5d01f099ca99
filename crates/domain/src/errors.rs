//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CalStats
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CalStatsError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport unavailable or connection lost.
    #[error("Channel error: {0}")]
    Channel(String),

    /// Malformed frame or unexpected packet on the real-time channel.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Error reported by the analysis service, carried verbatim.
    #[error("{0}")]
    Backend(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl CalStatsError {
    /// Stable label for logging and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Channel(_) => "channel",
            Self::Protocol(_) => "protocol",
            Self::Backend(_) => "backend",
            Self::InvalidInput(_) => "invalid_input",
            Self::Io(_) => "io",
            Self::NotFound(_) => "not_found",
        }
    }

    /// Message suitable for display in the UI.
    ///
    /// Backend errors are shown verbatim, everything else keeps its prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend(message) | Self::InvalidInput(message) | Self::Channel(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for CalStatsError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(err.to_string())
        } else {
            Self::Io(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CalStatsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(format!("invalid JSON payload: {err}"))
    }
}

/// Result type alias for CalStats operations
pub type Result<T> = std::result::Result<T, CalStatsError>;
