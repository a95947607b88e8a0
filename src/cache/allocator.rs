use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::trace;

use crate::DecodedPayload;
use crate::Result;

/// Platform capability creating and releasing binary resource handles
/// (object URLs, GPU textures, mapped buffers...).
#[async_trait]
pub trait ResourceAllocator: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + std::fmt::Debug + 'static;

    async fn allocate(
        &self,
        payload: DecodedPayload,
    ) -> Result<Self::Handle>;

    /// Invalidates `handle`. Called exactly once per allocated handle.
    async fn release(
        &self,
        handle: Self::Handle,
    );
}

/// Handle produced by [`BytesAllocator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesRef {
    pub id: u64,
    pub mime: String,
    pub bytes: Bytes,
}

impl BytesRef {
    /// Addressable reference, unique per allocation
    pub fn uri(&self) -> String {
        format!("inlay-resource://{}", self.id)
    }
}

/// Reference allocator sharing the decoded bytes behind a numbered handle.
///
/// Tracks allocations and releases so leaks show up as a non-zero
/// [`BytesAllocator::live`].
#[derive(Debug, Default)]
pub struct BytesAllocator {
    next_id: AtomicU64,
    allocated: AtomicUsize,
    released: AtomicUsize,
}

impl BytesAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Handles allocated and not yet released
    pub fn live(&self) -> usize {
        self.allocated() - self.released()
    }
}

#[async_trait]
impl ResourceAllocator for BytesAllocator {
    type Handle = BytesRef;

    async fn allocate(
        &self,
        payload: DecodedPayload,
    ) -> Result<Self::Handle> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.allocated.fetch_add(1, Ordering::SeqCst);
        trace!(id, mime = %payload.mime, len = payload.bytes.len(), "allocate");
        Ok(BytesRef {
            id,
            mime: payload.mime,
            bytes: payload.bytes,
        })
    }

    async fn release(
        &self,
        handle: Self::Handle,
    ) {
        self.released.fetch_add(1, Ordering::SeqCst);
        trace!(id = handle.id, "release");
    }
}
