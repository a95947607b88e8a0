//! Typed publish/subscribe for inlay state changes.
//!
//! Producers (the reconciler) emit [`InlayEvent`]s; observers subscribe per
//! [`EventKind`]. Delivery is synchronous and only reaches subscribers
//! registered at emission time. Events are never persisted.
//!
//! Each handler runs isolated: a panicking handler is logged and skipped,
//! the remaining handlers still receive the event and the emitter carries on.
mod bus;

#[cfg(test)]
mod bus_test;

pub use bus::*;

use serde::Deserialize;
use serde::Serialize;

use crate::InlayKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InlayEvent {
    /// Type metadata was written for `keys`
    DataAdded { keys: Vec<InlayKey>, source: String },

    /// Metadata for `key` was dropped because the store no longer lists it
    DataRemoved { key: InlayKey },

    /// One full reconciliation pass finished
    SyncCompleted {
        new_keys: Vec<InlayKey>,
        deleted_keys: Vec<InlayKey>,
        total_keys: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    DataAdded,
    DataRemoved,
    SyncCompleted,
}

impl InlayEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InlayEvent::DataAdded { .. } => EventKind::DataAdded,
            InlayEvent::DataRemoved { .. } => EventKind::DataRemoved,
            InlayEvent::SyncCompleted { .. } => EventKind::SyncCompleted,
        }
    }
}
