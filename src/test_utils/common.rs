use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::InlayData;
use crate::InlayKey;
use crate::InlayPayload;
use crate::InlayStore;
use crate::InlayType;
use crate::MemInlayStore;
use crate::Result;

/// base64 of "png-bytes"
pub const PNG_DATA_URI: &str = "data:image/png;base64,cG5nLWJ5dGVz";

pub fn encoded_inlay(kind: Option<InlayType>) -> InlayData {
    InlayData::new(InlayPayload::encoded(PNG_DATA_URI), kind)
}

/// Store listing `keys` in order, each an encoded image
pub fn store_with(keys: &[&str]) -> Arc<MemInlayStore> {
    let store = MemInlayStore::new();
    for key in keys {
        store.insert(*key, encoded_inlay(Some(InlayType::Image)));
    }
    Arc::new(store)
}

pub fn keys(keys: &[&str]) -> Vec<InlayKey> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// Wraps a store and suspends before every read
pub struct SlowStore {
    pub inner: Arc<MemInlayStore>,
    pub delay: Duration,
}

#[async_trait]
impl InlayStore for SlowStore {
    async fn get_keys(&self) -> Result<Vec<InlayKey>> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_keys().await
    }

    async fn get_inlay_data(
        &self,
        key: &str,
    ) -> Result<Option<InlayData>> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_inlay_data(key).await
    }
}
