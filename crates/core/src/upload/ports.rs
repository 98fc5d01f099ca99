//! Port interfaces for the upload flow
//!
//! These traits define the boundaries between the upload session and the
//! transport and filesystem adapters in `calstats-infra`.

use std::path::Path;

use async_trait::async_trait;
use calstats_domain::{OutboundEvent, Result};

use super::subscription::{Subscription, SubscriptionId};

/// Real-time channel to the analysis service
///
/// Constructed explicitly and injected; connect and disconnect follow the
/// application context lifecycle.
#[async_trait]
pub trait RealtimeChannel: Send + Sync {
    /// Open the connection and join the default namespace
    async fn connect(&self) -> Result<()>;

    /// Close the connection. Safe to call when already closed.
    async fn disconnect(&self) -> Result<()>;

    /// Whether the channel can currently send
    fn is_connected(&self) -> bool;

    /// Send a named event
    async fn emit(&self, event: OutboundEvent) -> Result<()>;

    /// Start receiving inbound events
    fn subscribe(&self) -> Subscription;

    /// Stop delivery to a subscription. Returns whether it was registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Reads a selected calendar file
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Read the whole file as text
    async fn read_to_string(&self, path: &Path) -> Result<String>;
}
