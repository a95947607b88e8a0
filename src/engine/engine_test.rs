use std::sync::Arc;

use crate::test_utils::store_with;
use crate::test_utils::TrackingAllocator;
use crate::EventKind;
use crate::HookRegistry;
use crate::InlayConfig;
use crate::InlayEngine;
use crate::InlayEngineBuilder;
use crate::InlayEvent;
use crate::MemInlayStore;
use crate::ScriptMode;

fn engine(store: Arc<MemInlayStore>) -> (InlayEngine<TrackingAllocator>, Arc<TrackingAllocator>) {
    let allocator = Arc::new(TrackingAllocator::new());
    let engine = InlayEngineBuilder::in_memory(InlayConfig::default(), allocator.clone(), store)
        .build()
        .unwrap();
    (engine, allocator)
}

#[tokio::test]
async fn test_components_share_store_and_metadata() {
    let (engine, _) = engine(store_with(&["a", "b"]));

    engine.sync().await.unwrap();

    assert_eq!(engine.store().get_keys().await.unwrap().len(), 2);
    assert_eq!(engine.metadata().types.get_keys().await.unwrap().len(), 2);
    assert!(engine.cache().get_data("a").await.unwrap().is_some());
}

#[tokio::test]
async fn test_attached_observer_syncs_through_engine_bus() {
    let (engine, _) = engine(store_with(&["a"]));
    let (_, mut added) = engine.events().subscribe_channel(EventKind::DataAdded);
    let pipeline = HookRegistry::new();

    engine.attach(&pipeline);
    pipeline
        .run(ScriptMode::EditDisplay, "{{inlayeddata::a}}".to_string())
        .await;

    assert!(matches!(added.try_recv(), Ok(InlayEvent::DataAdded { .. })));
    assert!(engine.detach(&pipeline));
}

/// # Case 1: shutdown with cached handles
///
/// ## Criterias:
/// 1. every handle released exactly once
/// 2. cache empty afterwards but still usable
#[tokio::test]
async fn test_shutdown_case1() {
    let (engine, allocator) = engine(store_with(&["a", "b", "c"]));
    for key in ["a", "b", "c"] {
        engine.cache().get_data(key).await.unwrap();
    }

    assert_eq!(engine.shutdown().await.unwrap(), 3);

    assert_eq!(allocator.live(), 0);
    assert!(engine.cache().is_empty().await);
    assert!(engine.cache().get_data("a").await.unwrap().is_some());
}

/// # Case 2: shutdown with an empty cache
///
/// ## Criterias:
/// 1. nothing released, no error
#[tokio::test]
async fn test_shutdown_case2() {
    let (engine, allocator) = engine(store_with(&[]));

    assert_eq!(engine.shutdown().await.unwrap(), 0);
    assert!(allocator.released().is_empty());
}
