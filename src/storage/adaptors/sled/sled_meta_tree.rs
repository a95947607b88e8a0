use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;
use tracing::trace;

use crate::InlayKey;
use crate::MetaTree;
use crate::Result;
use crate::StorageError;

/// Metadata namespace stored as one sled tree
#[derive(Clone)]
pub struct SledMetaTree {
    tree: sled::Tree,
}

impl std::fmt::Debug for SledMetaTree {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("SledMetaTree")
            .field("namespace", &String::from_utf8_lossy(&self.tree.name()))
            .field("tree_len", &self.tree.len())
            .finish()
    }
}

impl SledMetaTree {
    pub fn open(
        db: Arc<sled::Db>,
        namespace: &str,
    ) -> Result<Self> {
        let tree = db.open_tree(namespace).map_err(|e| {
            error!("Failed to open metadata tree {}: {}", namespace, e);
            StorageError::SledError(e)
        })?;
        Ok(Self { tree })
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

fn decode_utf8(
    raw: &[u8],
    what: &str,
) -> Result<String> {
    String::from_utf8(raw.to_vec()).map_err(|e| {
        StorageError::CorruptValue {
            key: String::from_utf8_lossy(raw).into_owned(),
            reason: format!("{what} is not utf-8: {e}"),
        }
        .into()
    })
}

#[async_trait]
impl MetaTree for SledMetaTree {
    async fn keys(&self) -> Result<Vec<InlayKey>> {
        let mut keys = Vec::with_capacity(self.tree.len());
        for key in self.tree.iter().keys() {
            keys.push(decode_utf8(&key?, "key")?);
        }
        Ok(keys)
    }

    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>> {
        match self.tree.get(key.as_bytes())? {
            Some(ivec) => decode_utf8(&ivec, "value").map(Some),
            None => Ok(None),
        }
    }

    async fn insert_if_absent(
        &self,
        key: &str,
        value: &str,
    ) -> Result<bool> {
        // atomic: succeeds only when the current value is None
        let swapped = self.tree.compare_and_swap(
            key.as_bytes(),
            None as Option<&[u8]>,
            Some(value.as_bytes()),
        )?;
        Ok(swapped.is_ok())
    }

    async fn remove_many(
        &self,
        keys: &[InlayKey],
    ) -> Result<()> {
        let mut batch = sled::Batch::default();
        for key in keys {
            batch.remove(key.as_bytes());
        }
        self.tree.apply_batch(batch)?;
        trace!(count = keys.len(), "SledMetaTree remove_many");
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let bytes = self.tree.flush_async().await?;
        trace!("Successfully flushed sled tree, bytes flushed: {}", bytes);
        Ok(())
    }
}
