use super::*;
use crate::InlayPayload;
use crate::InlayType;

#[tokio::test]
async fn test_fs_inlay_store_lists_files_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.png"), b"png").unwrap();
    std::fs::write(dir.path().join("a.mp3"), b"mp3").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    let store = FsInlayStore::new(dir.path());
    let keys = store.get_keys().await.unwrap();

    assert_eq!(keys, vec!["a.mp3".to_string(), "b.png".to_string()]);
}

#[tokio::test]
async fn test_fs_inlay_store_reads_type_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("clip.webm"), b"webm").unwrap();
    std::fs::write(dir.path().join("blob.bin"), b"bin").unwrap();

    let store = FsInlayStore::new(dir.path());

    let clip = store.get_inlay_data("clip.webm").await.unwrap().unwrap();
    assert_eq!(clip.kind, Some(InlayType::Video));
    assert_eq!(clip.payload, InlayPayload::binary(b"webm".to_vec(), Some("video/webm")));

    let blob = store.get_inlay_data("blob.bin").await.unwrap().unwrap();
    assert_eq!(blob.kind, None);
    assert_eq!(blob.kind_or_default(), InlayType::Image);
}

#[tokio::test]
async fn test_fs_inlay_store_missing_and_escaping_keys_are_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsInlayStore::new(dir.path());

    assert!(store.get_inlay_data("nope.png").await.unwrap().is_none());
    assert!(store.get_inlay_data("../etc/passwd").await.unwrap().is_none());
    assert!(store.get_inlay_data("..").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fs_inlay_store_missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsInlayStore::new(dir.path().join("missing"));

    assert!(store.get_keys().await.is_err());
}
