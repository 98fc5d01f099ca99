use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use calstats_core::{FileSource, ListenerRegistry, RealtimeChannel, Subscription, SubscriptionId};
use calstats_domain::{CalStatsError, InboundEvent, OutboundEvent, Result as DomainResult};

/// In-memory channel that records emitted events.
///
/// `push` simulates the server sending an event to every subscriber.
#[derive(Default)]
pub struct MockChannel {
    connected: AtomicBool,
    emitted: Mutex<Vec<OutboundEvent>>,
    listeners: ListenerRegistry,
}

impl MockChannel {
    pub fn connected() -> Arc<Self> {
        let channel = Self::default();
        channel.connected.store(true, Ordering::SeqCst);
        Arc::new(channel)
    }

    pub fn disconnected() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn emitted(&self) -> Vec<OutboundEvent> {
        self.emitted.lock().unwrap().clone()
    }

    pub fn push(&self, event: &InboundEvent) -> usize {
        self.listeners.dispatch(event)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[async_trait]
impl RealtimeChannel for MockChannel {
    async fn connect(&self) -> DomainResult<()> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> DomainResult<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn emit(&self, event: OutboundEvent) -> DomainResult<()> {
        self.emitted.lock().unwrap().push(event);
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.listeners.register()
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}

/// File source backed by a map of path to contents.
#[derive(Default)]
pub struct MockFileSource {
    files: HashMap<PathBuf, String>,
}

impl MockFileSource {
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

#[async_trait]
impl FileSource for MockFileSource {
    async fn read_to_string(&self, path: &Path) -> DomainResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| CalStatsError::NotFound(path.display().to_string()))
    }
}
