//! Raw key/value namespace backing one metadata store
//!
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::InlayKey;
use crate::Result;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MetaTree: Send + Sync + 'static {
    /// Every persisted key, order irrelevant
    async fn keys(&self) -> Result<Vec<InlayKey>>;

    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>>;

    /// Writes `value` only when `key` is absent.
    ///
    /// Returns `true` when this call performed the write, `false` when a
    /// record already existed and was left untouched.
    async fn insert_if_absent(
        &self,
        key: &str,
        value: &str,
    ) -> Result<bool>;

    /// Removes every key in `keys`; missing keys are ignored
    async fn remove_many(
        &self,
        keys: &[InlayKey],
    ) -> Result<()>;

    /// Makes previous writes durable. No-op for volatile backends.
    async fn flush(&self) -> Result<()>;
}
