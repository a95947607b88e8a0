use std::panic::catch_unwind;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use dashmap::DashMap;
use lazy_static::lazy_static;
use tokio::sync::mpsc;
use tracing::trace;
use tracing::warn;

use super::EventKind;
use super::InlayEvent;

pub type EventHandler = Arc<dyn Fn(&InlayEvent) + Send + Sync + 'static>;

/// Token returned by [`EventBus::subscribe`], required to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    handler: EventHandler,
}

lazy_static! {
    static ref GLOBAL_BUS: Arc<EventBus> = Arc::new(EventBus::new());
}

pub struct EventBus {
    /// Subscribers grouped by event kind, in subscription order
    subscribers: DashMap<EventKind, Vec<Subscriber>>,

    /// Next subscription id (monotonically increasing)
    next_id: AtomicU64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("kinds", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Process-wide bus, for hosts that have no context object to thread through
    pub fn global() -> Arc<EventBus> {
        GLOBAL_BUS.clone()
    }

    pub fn subscribe<F>(
        &self,
        kind: EventKind,
        handler: F,
    ) -> SubscriptionId
    where
        F: Fn(&InlayEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.entry(kind).or_default().push(Subscriber {
            id,
            handler: Arc::new(handler),
        });
        trace!(?kind, ?id, "subscribed");
        id
    }

    /// Forwards every event of `kind` into an unbounded channel.
    ///
    /// The subscription stays registered after the receiver is dropped;
    /// call [`EventBus::unsubscribe`] to remove it.
    pub fn subscribe_channel(
        &self,
        kind: EventKind,
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<InlayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.subscribe(kind, move |event| {
            if tx.send(event.clone()).is_err() {
                trace!("event channel receiver dropped");
            }
        });
        (id, rx)
    }

    /// Returns whether a subscription was removed
    pub fn unsubscribe(
        &self,
        id: SubscriptionId,
    ) -> bool {
        let mut removed = false;
        self.subscribers.retain(|_, subs| {
            let before = subs.len();
            subs.retain(|s| s.id != id);
            removed |= subs.len() != before;
            !subs.is_empty()
        });
        trace!(?id, removed, "unsubscribe");
        removed
    }

    /// Delivers `event` to every current subscriber of its kind.
    ///
    /// Returns the number of handlers that completed without panicking.
    pub fn emit(
        &self,
        event: InlayEvent,
    ) -> usize {
        let kind = event.kind();
        // snapshot so handlers may (un)subscribe while being called
        let handlers: Vec<(SubscriptionId, EventHandler)> = match self.subscribers.get(&kind) {
            Some(subs) => subs.iter().map(|s| (s.id, s.handler.clone())).collect(),
            None => Vec::new(),
        };

        let mut delivered = 0;
        for (id, handler) in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(()) => delivered += 1,
                Err(_) => warn!(?kind, ?id, "event subscriber panicked; skipped"),
            }
        }

        trace!(?kind, delivered, "emit");
        delivered
    }

    pub fn subscriber_count(
        &self,
        kind: EventKind,
    ) -> usize {
        self.subscribers.get(&kind).map(|subs| subs.len()).unwrap_or(0)
    }
}
