//! Subscriber bookkeeping for real-time channels
//!
//! Each subscriber gets its own unbounded queue. Dispatch clones the event
//! into every live queue and forgets queues whose receiver was dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use calstats_domain::InboundEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

/// Cancellation token returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A live subscription: its id plus the receiving end of its queue
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub receiver: UnboundedReceiver<InboundEvent>,
}

impl Subscription {
    /// Wait for the next event. `None` once unsubscribed and drained.
    pub async fn recv(&mut self) -> Option<InboundEvent> {
        self.receiver.recv().await
    }
}

/// Registry of subscriber queues
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, UnboundedSender<InboundEvent>)>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::unbounded_channel();
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push((id, sender));
        trace!(%id, "listener registered");
        Subscription { id, receiver }
    }

    pub fn remove(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener, _)| *listener != id);
        before != listeners.len()
    }

    /// Deliver `event` to every live subscriber. Returns how many got it.
    pub fn dispatch(&self, event: &InboundEvent) -> usize {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|(_, sender)| sender.send(event.clone()).is_ok());
        trace!(event = event.name(), delivered = listeners.len(), "event dispatched");
        listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use calstats_domain::ErrorPayload;

    use super::*;

    fn error_event() -> InboundEvent {
        InboundEvent::Error(ErrorPayload { error: "boom".into() })
    }

    #[tokio::test]
    async fn dispatch_reaches_every_subscriber() {
        let registry = ListenerRegistry::new();
        let mut first = registry.register();
        let mut second = registry.register();
        assert_ne!(first.id, second.id);

        assert_eq!(registry.dispatch(&error_event()), 2);
        assert_eq!(first.recv().await, Some(error_event()));
        assert_eq!(second.recv().await, Some(error_event()));
    }

    #[tokio::test]
    async fn removed_subscriber_stops_receiving() {
        let registry = ListenerRegistry::new();
        let mut subscription = registry.register();

        assert!(registry.remove(subscription.id));
        assert!(!registry.remove(subscription.id));
        assert_eq!(registry.dispatch(&error_event()), 0);
        assert_eq!(subscription.recv().await, None);
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let registry = ListenerRegistry::new();
        let subscription = registry.register();
        drop(subscription);

        assert_eq!(registry.dispatch(&error_event()), 0);
        assert!(registry.is_empty());
    }
}
