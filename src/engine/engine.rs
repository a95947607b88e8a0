use std::sync::Arc;

use tracing::info;

use crate::ContentObserver;
use crate::EventBus;
use crate::HookPipeline;
use crate::InlayConfig;
use crate::InlayStore;
use crate::MetadataStore;
use crate::Reconciler;
use crate::ResourceAllocator;
use crate::ResourceCache;
use crate::Result;
use crate::SyncReport;

/// Assembled by [`InlayEngineBuilder`](crate::InlayEngineBuilder).
pub struct InlayEngine<A: ResourceAllocator> {
    pub(super) config: InlayConfig,
    pub(super) store: Arc<dyn InlayStore>,
    pub(super) metadata: MetadataStore,
    pub(super) events: Arc<EventBus>,
    pub(super) cache: Arc<ResourceCache<A>>,
    pub(super) reconciler: Arc<Reconciler>,
    pub(super) observer: Arc<ContentObserver>,
}

impl<A: ResourceAllocator> std::fmt::Debug for InlayEngine<A> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("InlayEngine")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<A: ResourceAllocator> InlayEngine<A> {
    pub fn config(&self) -> &InlayConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn InlayStore> {
        &self.store
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn cache(&self) -> &Arc<ResourceCache<A>> {
        &self.cache
    }

    pub fn reconciler(&self) -> &Arc<Reconciler> {
        &self.reconciler
    }

    pub fn observer(&self) -> &Arc<ContentObserver> {
        &self.observer
    }

    pub async fn sync(&self) -> Result<SyncReport> {
        self.reconciler.sync().await
    }

    /// Registers the observer with the host's display pipeline
    pub fn attach(
        &self,
        pipeline: &dyn HookPipeline,
    ) {
        self.observer.attach(pipeline);
    }

    pub fn detach(
        &self,
        pipeline: &dyn HookPipeline,
    ) -> bool {
        self.observer.detach(pipeline)
    }

    /// Releases every cached handle and flushes metadata.
    ///
    /// Returns the number of handles released. The engine stays usable; the
    /// cache simply refills on demand.
    pub async fn shutdown(&self) -> Result<usize> {
        let released = self.cache.revoke_all().await;
        self.metadata.flush().await?;
        info!(released, "inlay engine shut down");
        Ok(released)
    }
}
