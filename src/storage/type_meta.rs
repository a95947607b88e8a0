use std::sync::Arc;

use tracing::trace;

use super::MetaTree;
use crate::InlayKey;
use crate::InlayType;
use crate::Result;
use crate::StorageError;

/// Resource type per inlay key
#[derive(Clone)]
pub struct TypeMeta {
    tree: Arc<dyn MetaTree>,
}

impl std::fmt::Debug for TypeMeta {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("TypeMeta").finish_non_exhaustive()
    }
}

impl TypeMeta {
    pub fn new(tree: Arc<dyn MetaTree>) -> Self {
        Self { tree }
    }

    pub async fn get_keys(&self) -> Result<Vec<InlayKey>> {
        self.tree.keys().await
    }

    pub async fn get_type(
        &self,
        key: &str,
    ) -> Result<Option<InlayType>> {
        match self.tree.get(key).await? {
            Some(tag) => tag.parse::<InlayType>().map(Some).map_err(|e| {
                StorageError::CorruptValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
                .into()
            }),
            None => Ok(None),
        }
    }

    /// Set-if-absent; returns whether this call wrote the record
    pub async fn set_type(
        &self,
        key: &str,
        kind: InlayType,
    ) -> Result<bool> {
        let written = self.tree.insert_if_absent(key, kind.as_tag()).await?;
        trace!(%key, %kind, written, "set_type");
        Ok(written)
    }

    pub async fn bulk_delete(
        &self,
        keys: &[InlayKey],
    ) -> Result<()> {
        self.tree.remove_many(keys).await
    }

    pub async fn flush(&self) -> Result<()> {
        self.tree.flush().await
    }
}
