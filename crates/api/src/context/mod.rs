//! Application context - dependency injection container
//!
//! Owns the channel, the upload session, the timeline view and the stats
//! panel. `mount` subscribes and connects; `unmount` reverses both and
//! releases the widget.

use std::path::PathBuf;
use std::sync::Arc;

use calstats_core::{
    FileSource, RealtimeChannel, StatsPanel, Subscription, SubscriptionId, TimelineView,
    UploadPhase, UploadService,
};
use calstats_domain::{Config, InboundEvent, RawEvent, Result};
use calstats_infra::{IcsFileSource, TextTimelineWidget, WebSocketChannel};
use tracing::{info, warn};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    channel: Arc<dyn RealtimeChannel>,
    upload: UploadService,
    timeline: TimelineView<TextTimelineWidget>,
    stats: StatsPanel,
    /// Whether the views currently show an analysis result.
    showing_result: bool,
    subscription: Option<SubscriptionId>,
    /// Shared empty data set, so "no result" is always the same reference.
    no_events: Arc<[RawEvent]>,
}

impl AppContext {
    /// Wire the production adapters from configuration.
    pub fn new(config: Config) -> Self {
        let channel = Arc::new(WebSocketChannel::new(config.channel.clone()));
        Self::with_ports(config, channel, Arc::new(IcsFileSource::new()))
    }

    /// Wire explicit ports. Used by tests to inject mocks.
    pub fn with_ports(
        config: Config,
        channel: Arc<dyn RealtimeChannel>,
        files: Arc<dyn FileSource>,
    ) -> Self {
        Self {
            config,
            upload: UploadService::new(Arc::clone(&channel), files),
            channel,
            timeline: TimelineView::mount(TextTimelineWidget::new()),
            stats: StatsPanel::default(),
            showing_result: false,
            subscription: None,
            no_events: Arc::from(Vec::new()),
        }
    }

    /// Subscribe to inbound events, then connect.
    ///
    /// A failed connect is logged, not returned: the shell still starts and
    /// uploads report the missing connection.
    pub async fn mount(&mut self) -> Subscription {
        let subscription = self.channel.subscribe();
        self.subscription = Some(subscription.id);

        match self.channel.connect().await {
            Ok(()) => info!(url = %self.config.channel.url, "context mounted"),
            Err(err) => warn!(url = %self.config.channel.url, error = %err, "channel unavailable"),
        }
        subscription
    }

    /// Unsubscribe, disconnect and hand back the widget.
    pub async fn unmount(mut self) -> Result<TextTimelineWidget> {
        if let Some(id) = self.subscription.take() {
            self.channel.unsubscribe(id);
        }
        self.channel.disconnect().await?;
        info!("context unmounted");
        Ok(self.timeline.into_widget())
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    pub fn showing_result(&self) -> bool {
        self.showing_result
    }

    pub fn upload(&self) -> &UploadService {
        &self.upload
    }

    pub fn timeline(&self) -> &TimelineView<TextTimelineWidget> {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut TimelineView<TextTimelineWidget> {
        &mut self.timeline
    }

    pub fn stats(&self) -> &StatsPanel {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatsPanel {
        &mut self.stats
    }

    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.upload.select_file(path)
    }

    /// Run an upload attempt.
    ///
    /// Once past local validation the previous result is dropped from the
    /// views, even if the attempt later fails.
    pub async fn start_upload(&mut self) -> Result<()> {
        if self.upload.selected_file().is_some() {
            self.stats = StatsPanel::default();
            self.showing_result = false;
            self.timeline.set_data(Arc::clone(&self.no_events));
        }
        self.upload.upload().await
    }

    /// Apply an event delivered by the channel subscription.
    ///
    /// A result replaces the stats and timeline; an error leaves whatever is
    /// on screen.
    pub fn apply_inbound(&mut self, event: InboundEvent) -> &UploadPhase {
        self.upload.handle_inbound(event);
        if let Some(result) = self.upload.result() {
            self.stats = StatsPanel::from_result(result);
            self.showing_result = true;
            self.timeline.set_data(Arc::from(result.timeline.as_slice()));
        }
        self.upload.phase()
    }
}
