//! Upload session - client-side upload state machine
//!
//! `upload()` validates locally, reads the selected file, checks the channel
//! and emits. The answer arrives later as an inbound event and is applied
//! with [`UploadService::handle_inbound`]. Every failure is terminal for the
//! attempt; the user retries manually.
//!
//! The channel carries no request ids. If a second upload is started while
//! the first is pending, whichever answer arrives last wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use calstats_domain::constants::{ICS_EXTENSION, MSG_CHANNEL_NOT_CONNECTED, MSG_NO_FILE_SELECTED};
use calstats_domain::{
    AnalysisResult, CalStatsError, InboundEvent, OutboundEvent, Result, UploadPayload,
};
use tracing::{debug, error, info, warn};

use super::ports::{FileSource, RealtimeChannel};

/// Where the current upload attempt stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UploadPhase {
    #[default]
    Idle,
    Loading,
    Loaded(Box<AnalysisResult>),
    Failed(String),
}

impl UploadPhase {
    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Upload session service
pub struct UploadService {
    channel: Arc<dyn RealtimeChannel>,
    files: Arc<dyn FileSource>,
    selected: Option<PathBuf>,
    phase: UploadPhase,
}

impl UploadService {
    pub fn new(channel: Arc<dyn RealtimeChannel>, files: Arc<dyn FileSource>) -> Self {
        Self { channel, files, selected: None, phase: UploadPhase::Idle }
    }

    /// Remember the file to upload. Only `.ics` files are accepted.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if !has_ics_extension(&path) {
            return Err(CalStatsError::InvalidInput(format!(
                "{} is not a .{ICS_EXTENSION} file",
                path.display()
            )));
        }
        debug!(path = %path.display(), "file selected");
        self.selected = Some(path);
        Ok(())
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, UploadPhase::Loading)
    }

    /// Latest analysis result, if the last attempt succeeded
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            UploadPhase::Loaded(result) => Some(result),
            _ => None,
        }
    }

    /// Message of the last failure
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Start an upload attempt.
    ///
    /// On success the phase stays `Loading` until an inbound event is
    /// applied. On failure the phase is `Failed` and the error is returned.
    pub async fn upload(&mut self) -> Result<()> {
        let Some(path) = self.selected.clone() else {
            return Err(self.fail(CalStatsError::InvalidInput(MSG_NO_FILE_SELECTED.to_string())));
        };

        if self.is_loading() {
            warn!(
                path = %path.display(),
                "upload started while another is pending; responses are not correlated"
            );
        }
        self.phase = UploadPhase::Loading;

        let contents = match self.files.read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) => return Err(self.fail(err)),
        };

        if !self.channel.is_connected() {
            return Err(self.fail(CalStatsError::Channel(MSG_CHANNEL_NOT_CONNECTED.to_string())));
        }

        let bytes = contents.len();
        if let Err(err) = self.channel.emit(OutboundEvent::Upload(UploadPayload { file: contents })).await
        {
            return Err(self.fail(err));
        }

        info!(path = %path.display(), bytes, "calendar uploaded");
        Ok(())
    }

    /// Apply an inbound channel event.
    pub fn handle_inbound(&mut self, event: InboundEvent) -> &UploadPhase {
        if !self.is_loading() {
            debug!(event = event.name(), phase = self.phase.label(), "unsolicited inbound event");
        }

        self.phase = match event {
            InboundEvent::Result(result) => {
                info!(
                    events = result.timeline.len(),
                    days_last_year = result.days_last_year,
                    days_last_5_years = result.days_last_5_years,
                    "analysis received"
                );
                UploadPhase::Loaded(result)
            }
            InboundEvent::Error(payload) => {
                let err = CalStatsError::Backend(payload.error);
                error!(error = %err, kind = err.label(), "analysis service reported an error");
                UploadPhase::Failed(err.user_message())
            }
        };
        &self.phase
    }

    fn fail(&mut self, err: CalStatsError) -> CalStatsError {
        warn!(error = %err, kind = err.label(), "upload failed");
        self.phase = UploadPhase::Failed(err.user_message());
        err
    }
}

fn has_ics_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ICS_EXTENSION))
}
