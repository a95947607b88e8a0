//! Bounded cache turning raw inlay bytes into reusable resource handles.
//!
//! Handles come from an injected [`ResourceAllocator`]. The cache owns every
//! handle it allocates and releases each exactly once: on eviction, or on
//! [`ResourceCache::revoke_all`]. Entries are evicted in insertion order
//! (FIFO); lookups never reorder them.
mod allocator;
mod resource_cache;


pub use allocator::*;
pub use resource_cache::*;
