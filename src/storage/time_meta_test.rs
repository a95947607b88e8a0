use std::sync::Arc;

use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;

use super::*;
use crate::Error;
use crate::StorageError;

fn time_meta() -> TimeMeta {
    TimeMeta::new(Arc::new(MemMetaTree::new("time")))
}

/// # Case 1: first write wins
///
/// ## Criterias:
/// 1. only the first call reports a write
/// 2. the first timestamp stays in place
#[tokio::test]
async fn test_set_time_case1() {
    let meta = time_meta();
    let first = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    assert!(meta.set_time("x", first).await.unwrap());
    assert!(!meta.set_time("x", second).await.unwrap());

    assert_eq!(meta.get_time("x").await.unwrap(), first);
}

/// # Case 2: bulk delete resets newness
#[tokio::test]
async fn test_set_time_case2() {
    let meta = time_meta();
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    assert!(meta.set_time("x", ts).await.unwrap());
    meta.bulk_delete(&["x".to_string(), "never-seen".to_string()]).await.unwrap();

    assert!(meta.get_keys().await.unwrap().is_empty());
    assert!(meta.set_time("x", ts).await.unwrap());
}

#[tokio::test]
async fn test_get_time_defaults_to_epoch() {
    let meta = time_meta();

    assert_eq!(meta.get_time("ghost").await.unwrap(), DateTime::<Utc>::UNIX_EPOCH);
}

#[tokio::test]
async fn test_set_time_persists_iso_8601_millis() {
    let tree = Arc::new(MemMetaTree::new("time"));
    let meta = TimeMeta::new(tree.clone());
    let ts = Utc.with_ymd_and_hms(2024, 2, 29, 8, 30, 5).unwrap();

    meta.set_time("x", ts).await.unwrap();

    assert_eq!(
        tree.get("x").await.unwrap(),
        Some("2024-02-29T08:30:05.000Z".to_string())
    );
}

#[tokio::test]
async fn test_get_time_tolerates_garbage() {
    let tree = Arc::new(MemMetaTree::new("time"));
    tree.insert_if_absent("x", "not a date").await.unwrap();
    let meta = TimeMeta::new(tree);

    assert_eq!(meta.get_time("x").await.unwrap(), DateTime::<Utc>::UNIX_EPOCH);
}

#[tokio::test]
async fn test_set_time_propagates_backend_failure() {
    let mut tree = MockMetaTree::new();
    tree.expect_insert_if_absent()
        .times(1)
        .returning(|_, _| Err(StorageError::DbError("disk gone".into()).into()));
    let meta = TimeMeta::new(Arc::new(tree));

    let result = meta.set_time("x", Utc::now()).await;

    assert!(matches!(result, Err(Error::Storage(StorageError::DbError(_)))));
}
