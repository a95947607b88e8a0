//! Bounded resource cache and metadata reconciliation for inlay side-content.
//!
//! Chat messages reference binary assets with `{{inlay::KEY}}` markers. This
//! crate turns those assets into reusable resource handles, tracks first-seen
//! time and type for every key, and keeps that metadata in line with the
//! authoritative store.
mod authority;
mod cache;
mod config;
pub mod constants;
mod engine;
mod errors;
mod events;
mod inlay;
mod observer;
mod reconcile;
mod storage;

pub use authority::*;
pub use cache::*;
pub use config::*;
pub use engine::*;
pub use errors::*;
pub use events::*;
pub use inlay::*;
pub use observer::*;
pub use reconcile::*;
pub use storage::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
