//! Keeps the derived metadata in line with the authoritative inlay store.
//!
//! A pass moves through [`SyncPhase`]:
//!
//! ```text
//! Idle -> Diffing -> PerKeySync* -> BulkDelete -> Completed -> Idle
//! ```
//!
//! `Completed` is reached, and `SyncCompleted` emitted, on every pass that
//! could take its snapshot, whether or not anything changed.
mod reconciler;


pub use reconciler::*;
