#![allow(dead_code)]

use std::sync::Arc;

use inlay_engine::BytesAllocator;
use inlay_engine::EventBus;
use inlay_engine::EventKind;
use inlay_engine::InlayConfig;
use inlay_engine::InlayData;
use inlay_engine::InlayEngine;
use inlay_engine::InlayEngineBuilder;
use inlay_engine::InlayEvent;
use inlay_engine::InlayPayload;
use inlay_engine::InlayType;
use inlay_engine::MemInlayStore;
use tokio::sync::mpsc;

/// base64 of "png-bytes"
pub const PNG_DATA_URI: &str = "data:image/png;base64,cG5nLWJ5dGVz";

pub fn image(kind: Option<InlayType>) -> InlayData {
    InlayData::new(InlayPayload::encoded(PNG_DATA_URI), kind)
}

pub fn mem_engine(
    store: Arc<MemInlayStore>,
    config: InlayConfig,
) -> (InlayEngine<BytesAllocator>, Arc<BytesAllocator>) {
    let allocator = Arc::new(BytesAllocator::new());
    let engine = InlayEngineBuilder::in_memory(config, allocator.clone(), store)
        .build()
        .expect("build in-memory engine");
    (engine, allocator)
}

/// Every event on `bus`, in emission order
pub fn record_all(bus: &EventBus) -> mpsc::UnboundedReceiver<InlayEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    for kind in [EventKind::DataAdded, EventKind::DataRemoved, EventKind::SyncCompleted] {
        let tx = tx.clone();
        bus.subscribe(kind, move |event| {
            let _ = tx.send(event.clone());
        });
    }
    rx
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<InlayEvent>) -> Vec<InlayEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}
