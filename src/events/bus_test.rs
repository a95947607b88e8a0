use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_test::traced_test;

use super::*;

fn removed(key: &str) -> InlayEvent {
    InlayEvent::DataRemoved { key: key.to_string() }
}

#[test]
fn test_emit_reaches_only_matching_kind() {
    let bus = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    bus.subscribe(EventKind::DataRemoved, move |e| sink.lock().push(e.clone()));
    bus.subscribe(EventKind::SyncCompleted, |_| panic!("wrong kind delivered"));

    let delivered = bus.emit(removed("a"));

    assert_eq!(delivered, 1);
    assert_eq!(*seen.lock(), vec![removed("a")]);
}

#[test]
fn test_emit_without_subscribers() {
    let bus = EventBus::new();

    assert_eq!(bus.emit(removed("a")), 0);
}

#[test]
fn test_subscribers_called_in_subscription_order() {
    let bus = EventBus::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for n in 0..3 {
        let order = order.clone();
        bus.subscribe(EventKind::DataRemoved, move |_| order.lock().push(n));
    }
    bus.emit(removed("a"));

    assert_eq!(*order.lock(), vec![0, 1, 2]);
}

/// # Case 1: a panicking subscriber is isolated
///
/// ## Criterias:
/// 1. subscribers after the panicking one still receive the event
/// 2. emit returns normally and counts only completed deliveries
#[test]
#[traced_test]
fn test_subscriber_isolation_case1() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let h = hits.clone();
    bus.subscribe(EventKind::DataRemoved, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });
    bus.subscribe(EventKind::DataRemoved, |_| panic!("subscriber failure"));
    let h = hits.clone();
    bus.subscribe(EventKind::DataRemoved, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });

    let delivered = bus.emit(removed("a"));

    assert_eq!(delivered, 2);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(logs_contain("event subscriber panicked"));
}

#[test]
fn test_unsubscribe() {
    let bus = EventBus::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let h = hits.clone();
    let id = bus.subscribe(EventKind::DataRemoved, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(bus.subscriber_count(EventKind::DataRemoved), 1);

    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    bus.emit(removed("a"));

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(bus.subscriber_count(EventKind::DataRemoved), 0);
}

#[test]
fn test_handler_may_unsubscribe_itself_during_emit() {
    let bus = Arc::new(EventBus::new());
    let hits = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

    let (b, h, s) = (bus.clone(), hits.clone(), slot.clone());
    let id = bus.subscribe(EventKind::DataRemoved, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = s.lock().take() {
            b.unsubscribe(id);
        }
    });
    *slot.lock() = Some(id);

    bus.emit(removed("a"));
    bus.emit(removed("b"));

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_subscribe_channel_forwards_events() {
    let bus = EventBus::new();
    let (id, mut rx) = bus.subscribe_channel(EventKind::SyncCompleted);

    let done = InlayEvent::SyncCompleted {
        new_keys: vec!["a".into()],
        deleted_keys: vec![],
        total_keys: 1,
    };
    bus.emit(done.clone());

    assert_eq!(rx.recv().await, Some(done));
    assert!(bus.unsubscribe(id));
}

#[test]
fn test_global_bus_is_shared() {
    let a = EventBus::global();
    let b = EventBus::global();

    assert!(Arc::ptr_eq(&a, &b));
}
