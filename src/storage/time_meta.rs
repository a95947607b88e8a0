use std::sync::Arc;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use tracing::trace;
use tracing::warn;

use super::MetaTree;
use crate::InlayKey;
use crate::Result;

/// First-seen timestamps per inlay key
#[derive(Clone)]
pub struct TimeMeta {
    tree: Arc<dyn MetaTree>,
}

impl std::fmt::Debug for TimeMeta {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("TimeMeta").finish_non_exhaustive()
    }
}

impl TimeMeta {
    pub fn new(tree: Arc<dyn MetaTree>) -> Self {
        Self { tree }
    }

    pub async fn get_keys(&self) -> Result<Vec<InlayKey>> {
        self.tree.keys().await
    }

    /// Recorded first-seen time, or the Unix epoch when none is recorded
    pub async fn get_time(
        &self,
        key: &str,
    ) -> Result<DateTime<Utc>> {
        let Some(raw) = self.tree.get(key).await? else {
            return Ok(DateTime::<Utc>::UNIX_EPOCH);
        };

        match DateTime::parse_from_rfc3339(&raw) {
            Ok(ts) => Ok(ts.with_timezone(&Utc)),
            Err(e) => {
                warn!(%key, %raw, "unparsable first-seen timestamp: {}", e);
                Ok(DateTime::<Utc>::UNIX_EPOCH)
            }
        }
    }

    /// Records `timestamp` unless a time is already recorded for `key`.
    ///
    /// The returned flag is the only signal that `key` is new to the system.
    pub async fn set_time(
        &self,
        key: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<bool> {
        let value = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        let written = self.tree.insert_if_absent(key, &value).await?;
        trace!(%key, %value, written, "set_time");
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
