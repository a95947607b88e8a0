//! Authoritative inlay store: the source of truth for which keys exist.
//!
//! This crate only consumes the store. Hosts plug their own persistence in
//! by implementing [`InlayStore`]; [`MemInlayStore`] and [`FsInlayStore`]
//! cover embedding, tests and the `inlay-sync` binary.
mod fs_inlay_store;
mod mem_inlay_store;

#[cfg(test)]
mod fs_inlay_store_test;

pub use fs_inlay_store::*;
pub use mem_inlay_store::*;

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;

use crate::InlayData;
use crate::InlayKey;
use crate::Result;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait InlayStore: Send + Sync + 'static {
    /// All keys currently known, in the store's listing order
    async fn get_keys(&self) -> Result<Vec<InlayKey>>;

    /// Raw data for `key`, `None` when the key does not exist
    async fn get_inlay_data(
        &self,
        key: &str,
    ) -> Result<Option<InlayData>>;
}
