use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::DecodedPayload;
use crate::Error;
use crate::ResourceAllocator;
use crate::Result;

#[derive(Debug, Default)]
struct Ledger {
    next_id: u64,
    live: HashSet<u64>,
    released: Vec<u64>,
}

/// Allocator fake that panics on double release or release of an unknown
/// handle, and can be told to fail allocations.
#[derive(Debug, Default)]
pub struct TrackingAllocator {
    ledger: Mutex<Ledger>,
    pub fail_allocations: bool,
}

impl TrackingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_allocations: true,
            ..Self::default()
        }
    }

    pub fn allocated(&self) -> u64 {
        self.ledger.lock().next_id
    }

    pub fn live(&self) -> usize {
        self.ledger.lock().live.len()
    }

    /// Released handle ids, in release order
    pub fn released(&self) -> Vec<u64> {
        self.ledger.lock().released.clone()
    }
}

#[async_trait]
impl ResourceAllocator for TrackingAllocator {
    type Handle = u64;

    async fn allocate(
        &self,
        _payload: DecodedPayload,
    ) -> Result<u64> {
        if self.fail_allocations {
            return Err(Error::Allocation("allocator disabled".into()));
        }
        let mut ledger = self.ledger.lock();
        ledger.next_id += 1;
        let id = ledger.next_id;
        ledger.live.insert(id);
        Ok(id)
    }

    async fn release(
        &self,
        handle: u64,
    ) {
        let mut ledger = self.ledger.lock();
        assert!(ledger.live.remove(&handle), "handle {handle} released twice or never allocated");
        ledger.released.push(handle);
    }
}
