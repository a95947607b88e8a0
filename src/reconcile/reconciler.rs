use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;

use crate::constants::RECONCILER_SYNC_KEY_SOURCE;
use crate::EventBus;
use crate::InlayEvent;
use crate::InlayKey;
use crate::InlayStore;
use crate::MetadataStore;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Diffing,
    PerKeySync,
    BulkDelete,
    Completed,
}

/// Outcome of one [`Reconciler::sync`] pass, identical to the
/// `SyncCompleted` event it emitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// New keys whose type metadata was actually written
    pub new_keys: Vec<InlayKey>,
    /// Keys dropped from metadata
    pub deleted_keys: Vec<InlayKey>,
    /// Size of the authoritative key set in the snapshot
    pub total_keys: usize,
}

impl From<&SyncReport> for InlayEvent {
    fn from(report: &SyncReport) -> Self {
        InlayEvent::SyncCompleted {
            new_keys: report.new_keys.clone(),
            deleted_keys: report.deleted_keys.clone(),
            total_keys: report.total_keys,
        }
    }
}

pub struct Reconciler {
    store: Arc<dyn InlayStore>,
    meta: MetadataStore,
    events: Arc<EventBus>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Reconciler").field("meta", &self.meta).finish_non_exhaustive()
    }
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn InlayStore>,
        meta: MetadataStore,
        events: Arc<EventBus>,
    ) -> Self {
        Self { store, meta, events }
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.meta
    }

    /// Records type metadata for one key, see [`Reconciler::sync_key_from`]
    pub async fn sync_key(
        &self,
        key: &str,
    ) -> bool {
        self.sync_key_from(key, RECONCILER_SYNC_KEY_SOURCE).await
    }

    /// Records type metadata for `key` and announces it as `source`.
    ///
    /// Returns `false` without side effects when type metadata already
    /// exists, when the store does not list `key`, or on any store failure
    /// (logged). Returns `true` after exactly one type write and one
    /// `DataAdded` event.
    pub async fn sync_key_from(
        &self,
        key: &str,
        source: &str,
    ) -> bool {
        match self.try_sync_key(key, source).await {
            Ok(synced) => synced,
            Err(e) => {
                warn!(%key, "Error syncing key: {:?}", e);
                false
            }
        }
    }

    async fn try_sync_key(
        &self,
        key: &str,
        source: &str,
    ) -> Result<bool> {
        if self.meta.types.get_type(key).await?.is_some() {
            trace!(%key, "type metadata already present");
            return Ok(false);
        }

        let listed = self.store.get_keys().await?;
        if !listed.iter().any(|k| k == key) {
            trace!(%key, "key not listed by store");
            return Ok(false);
        }

        let Some(data) = self.store.get_inlay_data(key).await? else {
            debug!(%key, "key listed but data vanished");
            return Ok(false);
        };

        let kind = data.kind_or_default();
        if !self.meta.types.set_type(key, kind).await? {
            // a concurrent sync wrote it between our check and our write
            trace!(%key, "type metadata written concurrently");
            return Ok(false);
        }

        self.events.emit(InlayEvent::DataAdded {
            keys: vec![key.to_string()],
            source: source.to_string(),
        });
        debug!(%key, %kind, %source, "key synced");
        Ok(true)
    }

    /// Full reconciliation pass over a snapshot of both key sets.
    ///
    /// Per-key failures never abort the pass. Only a failure to take the
    /// snapshot itself is returned as an error, in which case no event is
    /// emitted.
    pub async fn sync(&self) -> Result<SyncReport> {
        trace!(phase = ?SyncPhase::Diffing, "sync");
        let authority_keys = self.store.get_keys().await.map_err(|e| {
            warn!("sync: failed to list authoritative keys: {:?}", e);
            e
        })?;
        let type_keys = self.meta.types.get_keys().await.map_err(|e| {
            warn!("sync: failed to list type metadata keys: {:?}", e);
            e
        })?;

        let (new_keys, mut deleted_keys) = diff_keys(&authority_keys, &type_keys);
        debug!(new = new_keys.len(), deleted = deleted_keys.len(), "sync diff");

        trace!(phase = ?SyncPhase::PerKeySync, "sync");
        let mut synced = Vec::with_capacity(new_keys.len());
        for key in new_keys {
            if self.sync_key(&key).await {
                synced.push(key);
            }
        }

        if !deleted_keys.is_empty() {
            trace!(phase = ?SyncPhase::BulkDelete, "sync");
            match self.delete_metadata(&deleted_keys).await {
                Ok(()) => {
                    for key in &deleted_keys {
                        self.events.emit(InlayEvent::DataRemoved { key: key.clone() });
                    }
                }
                Err(e) => {
                    warn!(count = deleted_keys.len(), "sync: bulk delete failed: {:?}", e);
                    deleted_keys.clear();
                }
            }
        }

        let report = SyncReport {
            new_keys: synced,
            deleted_keys,
            total_keys: authority_keys.len(),
        };
        self.events.emit(InlayEvent::from(&report));
        trace!(phase = ?SyncPhase::Completed, "sync");

        info!(
            new = report.new_keys.len(),
            deleted = report.deleted_keys.len(),
            total = report.total_keys,
            "sync completed"
        );
        trace!(phase = ?SyncPhase::Idle, "sync");
        Ok(report)
    }

    /// Drops type records, then first-seen records, for keys the store no
    /// longer lists. Only the type delete decides success.
    async fn delete_metadata(
        &self,
        keys: &[InlayKey],
    ) -> Result<()> {
        self.meta.types.bulk_delete(keys).await?;
        if let Err(e) = self.meta.time.bulk_delete(keys).await {
            warn!(count = keys.len(), "sync: failed to drop time metadata: {:?}", e);
        }
        Ok(())
    }
}

/// `(authority − metadata, metadata − authority)`, each in its listing order
pub fn diff_keys(
    authority_keys: &[InlayKey],
    metadata_keys: &[InlayKey],
) -> (Vec<InlayKey>, Vec<InlayKey>) {
    let authority: HashSet<&str> = authority_keys.iter().map(String::as_str).collect();
    let metadata: HashSet<&str> = metadata_keys.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let new_keys = authority_keys
        .iter()
        .filter(|k| !metadata.contains(k.as_str()) && seen.insert(k.as_str()))
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let deleted_keys = metadata_keys
        .iter()
        .filter(|k| !authority.contains(k.as_str()) && seen.insert(k.as_str()))
        .cloned()
        .collect();

    (new_keys, deleted_keys)
}
