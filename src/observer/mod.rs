//! Watches message content for inlay references and keeps metadata current.
//!
//! The host runs every displayed message through its [`HookPipeline`]. The
//! [`ContentObserver`] registers itself there, records the first-seen time
//! of every referenced key and asks the reconciler to sync keys it sees for
//! the first time. Content is never altered.
mod content_observer;
mod hook;


pub use content_observer::*;
pub use hook::*;
