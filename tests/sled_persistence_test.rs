mod common;

use std::sync::Arc;

use common::keys;
use inlay_engine::BytesAllocator;
use inlay_engine::InlayConfig;
use inlay_engine::InlayEngineBuilder;
use inlay_engine::InlayType;

fn config_in(temp_dir: &tempfile::TempDir) -> InlayConfig {
    let mut config = InlayConfig::default();
    config.storage.db_root_dir = temp_dir.path().join("db");
    config.authority.inlay_dir = temp_dir.path().join("inlays");
    config
}

#[tokio::test]
async fn test_directory_sync_survives_restart() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = config_in(&temp_dir);
    let inlay_dir = config.authority.inlay_dir.clone();
    std::fs::create_dir_all(&inlay_dir).unwrap();
    std::fs::write(inlay_dir.join("cat.png"), b"png").unwrap();
    std::fs::write(inlay_dir.join("purr.ogg"), b"ogg").unwrap();

    {
        let engine = InlayEngineBuilder::new(config.clone(), Arc::new(BytesAllocator::new()))
            .build()
            .unwrap();
        let report = engine.sync().await.unwrap();
        assert_eq!(report.new_keys, keys(&["cat.png", "purr.ogg"]));
        engine.shutdown().await.unwrap();
    }

    std::fs::remove_file(inlay_dir.join("cat.png")).unwrap();

    let engine = InlayEngineBuilder::new(config, Arc::new(BytesAllocator::new()))
        .build()
        .unwrap();
    assert_eq!(
        engine.metadata().types.get_type("purr.ogg").await.unwrap(),
        Some(InlayType::Audio)
    );

    let report = engine.sync().await.unwrap();
    assert!(report.new_keys.is_empty());
    assert_eq!(report.deleted_keys, keys(&["cat.png"]));
    assert_eq!(report.total_keys, 1);
}
