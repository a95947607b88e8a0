//! Context object wiring the cache, metadata, reconciler and observer.
//!
//! One [`InlayEngine`] per host replaces any process-wide state: every
//! component it owns is reachable through it and torn down by
//! [`InlayEngine::shutdown`].
mod builder;
mod engine;

#[cfg(test)]
mod engine_test;

pub use builder::*;
pub use engine::*;
