//! A builder for assembling an [`InlayEngine`].
//!
//! Every component has a production default derived from [`InlayConfig`]:
//! - authoritative store: [`FsInlayStore`] over `authority.inlay_dir`
//! - metadata: sled database under `storage.db_root_dir`
//! - events: a fresh [`EventBus`]
//!
//! Any of them can be overridden before [`InlayEngineBuilder::build`].
//!
//! ## Example
//! ```ignore
//! let engine = InlayEngineBuilder::new(InlayConfig::new()?, Arc::new(BytesAllocator::new()))
//!     .store(my_store) // Optional override
//!     .build()?;
//! ```
use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::ContentObserver;
use crate::EventBus;
use crate::FsInlayStore;
use crate::InlayConfig;
use crate::InlayEngine;
use crate::InlayStore;
use crate::MetadataStore;
use crate::Reconciler;
use crate::ResourceAllocator;
use crate::ResourceCache;
use crate::Result;

pub struct InlayEngineBuilder<A: ResourceAllocator> {
    config: InlayConfig,
    allocator: Arc<A>,
    store: Option<Arc<dyn InlayStore>>,
    metadata: Option<MetadataStore>,
    events: Option<Arc<EventBus>>,
}

impl<A: ResourceAllocator> InlayEngineBuilder<A> {
    pub fn new(
        config: InlayConfig,
        allocator: Arc<A>,
    ) -> Self {
        Self {
            config,
            allocator,
            store: None,
            metadata: None,
            events: None,
        }
    }

    /// Volatile metadata and an in-memory bus; the store must still be set.
    pub fn in_memory(
        config: InlayConfig,
        allocator: Arc<A>,
        store: Arc<dyn InlayStore>,
    ) -> Self {
        Self::new(config, allocator)
            .store(store)
            .metadata(MetadataStore::in_memory())
    }

    pub fn store(
        mut self,
        store: Arc<dyn InlayStore>,
    ) -> Self {
        self.store = Some(store);
        self
    }

    pub fn metadata(
        mut self,
        metadata: MetadataStore,
    ) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn event_bus(
        mut self,
        events: Arc<EventBus>,
    ) -> Self {
        self.events = Some(events);
        self
    }

    /// Validates the configuration and assembles the engine.
    ///
    /// Opens the sled metadata database unless metadata was supplied.
    pub fn build(self) -> Result<InlayEngine<A>> {
        let config = self.config.validate()?;
        debug!(?config, "building inlay engine");

        let store = match self.store {
            Some(store) => store,
            None => {
                info!(inlay_dir = ?config.authority.inlay_dir, "using directory inlay store");
                Arc::new(FsInlayStore::new(config.authority.inlay_dir.clone()))
            }
        };
        let metadata = match self.metadata {
            Some(metadata) => metadata,
            None => MetadataStore::open_sled(&config.storage)?,
        };
        let events = self.events.unwrap_or_else(|| Arc::new(EventBus::new()));

        let cache = Arc::new(ResourceCache::new(store.clone(), self.allocator, &config.cache));
        let reconciler = Arc::new(Reconciler::new(store.clone(), metadata.clone(), events.clone()));
        let observer = Arc::new(ContentObserver::new(reconciler.clone(), &config.observer)?);

        Ok(InlayEngine {
            config,
            store,
            metadata,
            events,
            cache,
            reconciler,
            observer,
        })
    }
}
