use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::trace;

use crate::InlayKey;
use crate::MetaTree;
use crate::Result;

/// In-memory metadata namespace
#[derive(Debug)]
pub struct MemMetaTree {
    namespace: &'static str,
    data: RwLock<HashMap<InlayKey, String>>,
}

impl MemMetaTree {
    pub fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

#[async_trait]
impl MetaTree for MemMetaTree {
    async fn keys(&self) -> Result<Vec<InlayKey>> {
        Ok(self.data.read().keys().cloned().collect())
    }

    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn insert_if_absent(
        &self,
        key: &str,
        value: &str,
    ) -> Result<bool> {
        let mut data = self.data.write();
        if data.contains_key(key) {
            return Ok(false);
        }
        data.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn remove_many(
        &self,
        keys: &[InlayKey],
    ) -> Result<()> {
        let mut data = self.data.write();
        for key in keys {
            data.remove(key);
        }
        trace!(namespace = self.namespace, count = keys.len(), "MemMetaTree remove_many");
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        trace!(namespace = self.namespace, "MemMetaTree flush (no-op)");
        Ok(())
    }
}
