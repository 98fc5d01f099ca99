//! # CalStats Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Timeline normalization, viewport navigation and selection
//! - The upload session state machine
//! - Presentation models for the statistics panel
//! - Port interfaces (traits) for the rendering widget, the real-time
//!   channel and the file source
//!
//! ## Architecture Principles
//! - Only depends on `calstats-domain`
//! - No sockets, files or terminals
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod stats;
pub mod timeline;
pub mod upload;
pub mod utils;

// Re-export specific items to avoid ambiguity
pub use stats::{CardKind, EligibilitySummary, StatCard, StatsPanel, WorkingTimeSummary};
pub use timeline::ports::{TimelineWidget, WidgetOptions};
pub use timeline::{
    normalize_event, normalize_events, EventDetail, SelectionTracker, TimelineView,
    ViewportController,
};
pub use upload::ports::{FileSource, RealtimeChannel};
pub use upload::{ListenerRegistry, Subscription, SubscriptionId, UploadPhase, UploadService};
