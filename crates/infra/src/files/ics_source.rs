//! Calendar file source backed by `tokio::fs`

use std::path::Path;

use async_trait::async_trait;
use calstats_core::FileSource;
use calstats_domain::constants::ICS_EXTENSION;
use calstats_domain::{CalStatsError, Result};
use tracing::debug;

/// Reads `.ics` files whole. No size limit, no chunking.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcsFileSource;

impl IcsFileSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSource for IcsFileSource {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        let is_calendar = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ICS_EXTENSION));
        if !is_calendar {
            return Err(CalStatsError::InvalidInput(format!(
                "{} is not a .{ICS_EXTENSION} file",
                path.display()
            )));
        }

        let contents = tokio::fs::read_to_string(path).await.map_err(|err| {
            let kind = err.kind();
            let message = format!("Failed to read {}: {err}", path.display());
            if kind == std::io::ErrorKind::NotFound {
                CalStatsError::NotFound(message)
            } else {
                CalStatsError::Io(message)
            }
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "calendar file read");
        Ok(contents)
    }
}
