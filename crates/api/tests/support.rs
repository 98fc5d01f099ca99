//! Shared helpers for app integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use calstats_core::{ListenerRegistry, RealtimeChannel, Subscription, SubscriptionId};
use calstats_domain::{InboundEvent, OutboundEvent, Result as DomainResult};
use calstats_infra::IcsFileSource;
use calstats_lib::AppContext;
use tempfile::NamedTempFile;

/// In-memory channel. `push` plays the server side.
#[derive(Default)]
pub struct ScriptedChannel {
    reachable: bool,
    connected: AtomicBool,
    pub emitted: Mutex<Vec<OutboundEvent>>,
    listeners: ListenerRegistry,
}

impl ScriptedChannel {
    pub fn reachable() -> Arc<Self> {
        Arc::new(Self { reachable: true, ..Self::default() })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, event: &InboundEvent) -> usize {
        self.listeners.dispatch(event)
    }

    pub fn emitted_count(&self) -> usize {
        self.emitted.lock().unwrap().len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[async_trait]
impl RealtimeChannel for ScriptedChannel {
    async fn connect(&self) -> DomainResult<()> {
        if !self.reachable {
            return Err(calstats_domain::CalStatsError::Channel("connection refused".into()));
        }
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

pub fn context_with(channel: Arc<ScriptedChannel>) -> AppContext {
    AppContext::with_ports(Default::default(), channel, Arc::new(IcsFileSource::new()))
}

pub fn calendar_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".ics").tempfile().unwrap();
    write!(file, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();
    file
}

pub fn result_event() -> InboundEvent {
    let payload = serde_json::json!({
        "timeline": [
            {"id": 0, "content": "Paris", "start": "2024-03-17T00:00:00+00:00", "end": "2024-03-20T00:00:00+00:00"},
            {"id": 1, "content": "Rome", "start": "2023-07-02T00:00:00+00:00"}
        ],
        "days_last_year": 3,
        "events_last_year": [
            {"content": "Paris", "start": "2024-03-17T00:00:00+00:00", "end": "2024-03-20T00:00:00+00:00", "days": 3}
        ],
        "days_last_5_years": 4,
        "events_last_5_years": []
    });
    InboundEvent::from_named("result", payload).unwrap().unwrap()
}
