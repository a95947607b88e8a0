//! `inlay-sync`: one reconciliation pass of a directory of inlay files
//! against the sled metadata database.
use std::sync::Arc;

use inlay_engine::BytesAllocator;
use inlay_engine::InlayConfig;
use inlay_engine::InlayEngineBuilder;
use inlay_engine::Result;
use tracing::error;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    init_observability();

    let config = InlayConfig::new()?;
    let engine = InlayEngineBuilder::new(config, Arc::new(BytesAllocator::new()))
        .build()
        .map_err(|e| {
            error!("failed to start inlay engine: {:?}", e);
            e
        })?;

    info!(
        inlay_dir = ?engine.config().authority.inlay_dir,
        db_root_dir = ?engine.config().storage.db_root_dir,
        "starting sync"
    );
    let report = engine.sync().await?;
    info!(
        new = ?report.new_keys,
        deleted = ?report.deleted_keys,
        total = report.total_keys,
        "sync finished"
    );

    engine.shutdown().await?;
    Ok(())
}

fn init_observability() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env());
    tracing_subscriber::registry().with(fmt_layer).init();
}
