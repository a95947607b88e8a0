use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::trace;

use super::InlayStore;
use crate::InlayData;
use crate::InlayKey;
use crate::Result;

/// In-memory authoritative store, listing keys in insertion order
#[derive(Debug, Default)]
pub struct MemInlayStore {
    entries: RwLock<IndexMap<InlayKey, InlayData>>,
}

impl MemInlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces `key`. Replacing keeps the original listing position.
    pub fn insert(
        &self,
        key: impl Into<InlayKey>,
        data: InlayData,
    ) {
        let key = key.into();
        trace!(%key, "MemInlayStore insert");
        self.entries.write().insert(key, data);
    }

    pub fn remove(
        &self,
        key: &str,
    ) -> Option<InlayData> {
        self.entries.write().shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl InlayStore for MemInlayStore {
    async fn get_keys(&self) -> Result<Vec<InlayKey>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    async fn get_inlay_data(
        &self,
        key: &str,
    ) -> Result<Option<InlayData>> {
        Ok(self.entries.read().get(key).cloned())
    }
}
