use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use super::ResourceAllocator;
use crate::CacheConfig;
use crate::InlayKey;
use crate::InlayStore;
use crate::InlayType;
use crate::Result;

/// A live handle and how its bytes should be interpreted
#[derive(Debug, Clone, PartialEq)]
pub struct CachedInlay<H> {
    pub handle: H,
    pub kind: InlayType,
}

/// FIFO-bounded map from inlay key to resource handle.
///
/// All mutation (insert, evict, revoke) happens under one async mutex. The
/// store fetch on a miss runs outside it; the map is re-checked before
/// allocating, so concurrent misses for one key allocate a single handle.
pub struct ResourceCache<A: ResourceAllocator> {
    store: Arc<dyn InlayStore>,
    allocator: Arc<A>,
    capacity: usize,
    // lookups only `peek`, so recency order stays insertion order and
    // `pop_lru` evicts the oldest in O(1)
    entries: Mutex<LruCache<InlayKey, CachedInlay<A::Handle>>>,
}

impl<A: ResourceAllocator> std::fmt::Debug for ResourceCache<A> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<A: ResourceAllocator> ResourceCache<A> {
    /// `config` is expected to be validated (`capacity > 0`)
    pub fn new(
        store: Arc<dyn InlayStore>,
        allocator: Arc<A>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            store,
            allocator,
            capacity: config.capacity.max(1),
            entries: Mutex::new(LruCache::unbounded()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached entry for `key`, creating it from the store on a miss.
    ///
    /// `Ok(None)` when the key is unknown to the store or its payload is not
    /// in a recognized shape; the cache is left untouched in both cases.
    pub async fn get_data(
        &self,
        key: &str,
    ) -> Result<Option<CachedInlay<A::Handle>>> {
        if let Some(hit) = self.entries.lock().await.peek(key) {
            trace!(%key, "cache hit");
            return Ok(Some(hit.clone()));
        }

        let data = match self.store.get_inlay_data(key).await {
            Ok(Some(data)) => data,
            Ok(None) => {
                debug!(%key, "inlay not found in store");
                return Ok(None);
            }
            Err(e) => {
                warn!(%key, "failed to read inlay from store: {:?}", e);
                return Err(e);
            }
        };

        let kind = data.kind_or_default();
        let decoded = match data.payload.decode() {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(%key, "unrecognized inlay payload: {}", e);
                return Ok(None);
            }
        };

        let mut entries = self.entries.lock().await;
        if let Some(hit) = entries.peek(key) {
            trace!(%key, "cache filled concurrently");
            return Ok(Some(hit.clone()));
        }

        let handle = self.allocator.allocate(decoded).await?;
        let cached = CachedInlay { handle, kind };
        entries.push(key.to_string(), cached.clone());
        debug!(%key, %kind, len = entries.len(), "cache insert");

        if entries.len() > self.capacity {
            if let Some((evicted, entry)) = entries.pop_lru() {
                debug!(key = %evicted, "cache evict");
                self.allocator.release(entry.handle).await;
            }
        }

        Ok(Some(cached))
    }

    pub async fn get_type(
        &self,
        key: &str,
    ) -> Option<InlayType> {
        self.get_data(key).await.ok().flatten().map(|cached| cached.kind)
    }

    /// The handle itself (URL or reference, depending on the allocator)
    pub async fn get_handle(
        &self,
        key: &str,
    ) -> Option<A::Handle> {
        self.get_data(key).await.ok().flatten().map(|cached| cached.handle)
    }

    /// Releases every held handle exactly once and empties the cache
    pub async fn revoke_all(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let mut released = 0;
        while let Some((key, entry)) = entries.pop_lru() {
            trace!(%key, "revoke");
            self.allocator.release(entry.handle).await;
            released += 1;
        }
        debug!(released, "cache revoked");
        released
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn contains(
        &self,
        key: &str,
    ) -> bool {
        self.entries.lock().await.contains(key)
    }

    /// Cached keys, oldest first
    pub async fn keys(&self) -> Vec<InlayKey> {
        // lru iterates most recent first
        let mut keys: Vec<InlayKey> = self.entries.lock().await.iter().map(|(k, _)| k.clone()).collect();
        keys.reverse();
        keys
    }
}
