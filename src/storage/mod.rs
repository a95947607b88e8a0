//! Derived metadata stores kept in line with the authoritative inlay store.
//!
//! Two namespaces are persisted independently:
//! - `time[key]`: RFC 3339 timestamp of the first time the key was seen
//! - `type[key]`: [`InlayType`](crate::InlayType) tag
//!
//! Both are first-write-wins until a key is bulk-deleted, so concurrent
//! writers commute and no locking is needed above the backend.
mod adaptors;
mod meta_tree;
mod time_meta;
mod type_meta;

#[cfg(test)]
mod time_meta_test;

pub use adaptors::*;
pub use meta_tree::*;
pub use time_meta::*;
pub use type_meta::*;

use std::sync::Arc;

use tracing::debug;

use crate::constants::TIME_NAMESPACE;
use crate::constants::TYPE_NAMESPACE;
use crate::Result;
use crate::StorageConfig;

/// Both metadata namespaces, opened against one backend
#[derive(Clone, Debug)]
pub struct MetadataStore {
    pub time: TimeMeta,
    pub types: TypeMeta,
}

impl MetadataStore {
    pub fn new(
        time: TimeMeta,
        types: TypeMeta,
    ) -> Self {
        Self { time, types }
    }

    /// Opens the `time` and `type` trees inside the sled database at
    /// `<db_root_dir>/inlay_meta`.
    pub fn open_sled(config: &StorageConfig) -> Result<Self> {
        debug!(db_root_dir = ?config.db_root_dir, "open sled metadata store");
        let db = Arc::new(init_sled_meta_db(config)?);

        Ok(Self {
            time: TimeMeta::new(Arc::new(SledMetaTree::open(db.clone(), TIME_NAMESPACE)?)),
            types: TypeMeta::new(Arc::new(SledMetaTree::open(db, TYPE_NAMESPACE)?)),
        })
    }

    /// Volatile store, nothing survives the process
    pub fn in_memory() -> Self {
        Self {
            time: TimeMeta::new(Arc::new(MemMetaTree::new(TIME_NAMESPACE))),
            types: TypeMeta::new(Arc::new(MemMetaTree::new(TYPE_NAMESPACE))),
        }
    }

    pub async fn flush(&self) -> Result<()> {
        self.time.flush().await?;
        self.types.flush().await
    }
}
