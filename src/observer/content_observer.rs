use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use super::ContentHook;
use super::HookPipeline;
use super::ScriptMode;
use crate::constants::INLAY_REFERENCE_PATTERN;
use crate::Error;
use crate::InlayKey;
use crate::ObserverConfig;
use crate::Reconciler;
use crate::Result;
use crate::TimeMeta;

pub struct ContentObserver {
    pattern: Regex,
    time: TimeMeta,
    reconciler: Arc<Reconciler>,
    source: String,
}

impl std::fmt::Debug for ContentObserver {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("ContentObserver")
            .field("pattern", &self.pattern.as_str())
            .field("source", &self.source)
            .finish()
    }
}

impl ContentObserver {
    /// First-seen times go to the reconciler's own metadata store.
    pub fn new(
        reconciler: Arc<Reconciler>,
        config: &ObserverConfig,
    ) -> Result<Self> {
        let pattern = Regex::new(INLAY_REFERENCE_PATTERN)
            .map_err(|e| Error::Fatal(format!("invalid inlay reference pattern: {e}")))?;

        Ok(Self {
            pattern,
            time: reconciler.metadata().time.clone(),
            reconciler,
            source: config.sync_source.clone(),
        })
    }

    /// Keys referenced by `content`, in order of appearance. Empty keys are
    /// skipped; repeats are kept.
    pub fn extract_keys(
        &self,
        content: &str,
    ) -> Vec<InlayKey> {
        self.pattern
            .captures_iter(content)
            .filter_map(|caps| caps.get(2))
            .map(|m| m.as_str())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Records every referenced key and returns `content` untouched.
    ///
    /// A key is synced only when this call wrote its first-seen time.
    /// Failures are logged per key and never stop the scan.
    pub async fn observe(
        &self,
        content: String,
    ) -> String {
        for key in self.extract_keys(&content) {
            match self.time.set_time(&key, Utc::now()).await {
                Ok(true) => {
                    let synced = self.reconciler.sync_key_from(&key, &self.source).await;
                    debug!(%key, synced, "first sighting of inlay key");
                }
                Ok(false) => trace!(%key, "inlay key already seen"),
                Err(e) => warn!(%key, "failed to record first-seen time: {:?}", e),
            }
        }
        content
    }

    pub fn attach(
        self: &Arc<Self>,
        pipeline: &dyn HookPipeline,
    ) {
        pipeline.add_handler(ScriptMode::EditDisplay, self.clone());
    }

    pub fn detach(
        self: &Arc<Self>,
        pipeline: &dyn HookPipeline,
    ) -> bool {
        let hook: Arc<dyn ContentHook> = self.clone();
        pipeline.remove_handler(ScriptMode::EditDisplay, &hook)
    }
}

#[async_trait]
impl ContentHook for ContentObserver {
    async fn handle(
        &self,
        content: String,
    ) -> String {
        self.observe(content).await
    }
}
