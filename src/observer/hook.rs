use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
#[cfg(test)]
use mockall::automock;
use tracing::trace;

/// Stage of the host's display pipeline a hook runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptMode {
    EditInput,
    EditOutput,
    EditRequest,
    EditDisplay,
}

/// Content transform registered with the host.
///
/// Hooks cannot fail: any error is handled inside and the content is passed
/// on regardless.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContentHook: Send + Sync + 'static {
    async fn handle(
        &self,
        content: String,
    ) -> String;
}

/// Host side registration point for [`ContentHook`]s
pub trait HookPipeline: Send + Sync {
    fn add_handler(
        &self,
        mode: ScriptMode,
        hook: Arc<dyn ContentHook>,
    );

    /// Returns whether `hook` was registered for `mode`
    fn remove_handler(
        &self,
        mode: ScriptMode,
        hook: &Arc<dyn ContentHook>,
    ) -> bool;
}

/// In-process [`HookPipeline`]; hooks run in registration order.
#[derive(Default)]
pub struct HookRegistry {
    hooks: DashMap<ScriptMode, Vec<Arc<dyn ContentHook>>>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let mut map = f.debug_map();
        for entry in self.hooks.iter() {
            map.entry(entry.key(), &entry.value().len());
        }
        map.finish()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler_count(
        &self,
        mode: ScriptMode,
    ) -> usize {
        self.hooks.get(&mode).map(|hooks| hooks.len()).unwrap_or(0)
    }

    /// Feeds `content` through every hook registered for `mode`
    pub async fn run(
        &self,
        mode: ScriptMode,
        mut content: String,
    ) -> String {
        // snapshot, no shard guard may live across an await
        let hooks: Vec<Arc<dyn ContentHook>> = match self.hooks.get(&mode) {
            Some(hooks) => hooks.value().clone(),
            None => return content,
        };

        for hook in hooks {
            content = hook.handle(content).await;
        }
        content
    }
}

impl HookPipeline for HookRegistry {
    fn add_handler(
        &self,
        mode: ScriptMode,
        hook: Arc<dyn ContentHook>,
    ) {
        trace!(?mode, "add_handler");
        self.hooks.entry(mode).or_default().push(hook);
    }

    fn remove_handler(
        &self,
        mode: ScriptMode,
        hook: &Arc<dyn ContentHook>,
    ) -> bool {
        let Some(mut hooks) = self.hooks.get_mut(&mode) else {
            return false;
        };
        let before = hooks.len();
        hooks.retain(|h| !std::ptr::addr_eq(Arc::as_ptr(h), Arc::as_ptr(hook)));
        let removed = hooks.len() != before;
        trace!(?mode, removed, "remove_handler");
        removed
    }
}
