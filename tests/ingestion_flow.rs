mod common;

use std::sync::atomic::Ordering;

use bytes::Bytes;
use uuid::Uuid;

use media_pipeline::common::error::ServiceError;
use media_pipeline::modules::content::model::Content;
use media_pipeline::modules::content::service::ContentService;

use common::test_state;

async fn upload_sample(harness: &common::TestHarness) -> Content {
    ContentService::upload_content(
        &harness.state,
        Bytes::from_static(b"\x89PNG fake image"),
        "image/png".to_string(),
        "photo.png",
        "Sunset".to_string(),
        Some("Over the bay".to_string()),
        "user-42".to_string(),
    )
    .await
    .expect("upload should succeed")
}

#[tokio::test]
async fn upload_stores_object_persists_row_and_publishes_job() {
    let harness = test_state();
    let content = upload_sample(&harness).await;

    assert!(!content.is_processed);
    assert!(content.processed_object_name.is_none());
    assert!(content.object_name.ends_with(".png"));
    assert_eq!(content.title, "Sunset");
    assert_eq!(content.uploaded_by, "user-42");
    assert_eq!(content.file_size, 15);

    // The raw bytes are resolvable under the generated key.
    assert_eq!(
        harness.storage.bytes_of(&content.object_name).unwrap(),
        Bytes::from_static(b"\x89PNG fake image")
    );

    let published = harness.queue.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].content_id, content.id);
    assert_eq!(published[0].object_name, content.object_name);
    assert_eq!(published[0].content_type, "image/png");
}

#[tokio::test]
async fn object_names_are_unique_across_uploads() {
    let harness = test_state();
    let a = upload_sample(&harness).await;
    let b = upload_sample(&harness).await;

    assert_ne!(a.object_name, b.object_name);
    assert_eq!(harness.storage.len(), 2);
}

#[tokio::test]
async fn publish_failure_does_not_fail_the_upload() {
    let harness = test_state();
    harness.queue.fail.store(true, Ordering::SeqCst);

    let content = upload_sample(&harness).await;

    // The content exists, unprocessed, with no job dispatched.
    assert!(harness.queue.published().is_empty());
    assert_eq!(harness.content.row_count(), 1);
    assert!(!content.is_processed);
}

#[tokio::test]
async fn storage_failure_aborts_before_any_row_is_created() {
    let harness = test_state();
    harness.storage.fail_puts.store(true, Ordering::SeqCst);

    let err = ContentService::upload_content(
        &harness.state,
        Bytes::from_static(b"data"),
        "image/png".to_string(),
        "photo.png",
        "Sunset".to_string(),
        None,
        "user-42".to_string(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Storage(_)));
    assert_eq!(harness.content.row_count(), 0);
    assert!(harness.queue.published().is_empty());
}

#[tokio::test]
async fn update_processed_content_is_idempotent() {
    let harness = test_state();
    let content = upload_sample(&harness).await;
    let processed_key = format!("processed/{}", content.object_name);

    let first =
        ContentService::update_processed_content(&harness.state, content.id, &processed_key)
            .await
            .unwrap();
    let second =
        ContentService::update_processed_content(&harness.state, content.id, &processed_key)
            .await
            .unwrap();

    assert!(first.is_processed);
    assert_eq!(first.processed_object_name.as_deref(), Some(processed_key.as_str()));
    assert_eq!(second.is_processed, first.is_processed);
    assert_eq!(second.processed_object_name, first.processed_object_name);
}

#[tokio::test]
async fn update_processed_content_unknown_id_is_not_found() {
    let harness = test_state();
    let err = ContentService::update_processed_content(
        &harness.state,
        Uuid::new_v4(),
        "processed/missing.png",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn url_falls_back_to_raw_object_until_processing_completes() {
    let harness = test_state();
    let content = upload_sample(&harness).await;

    // useProcessed requested before the worker has finished.
    let (url, key, processed) =
        ContentService::get_content_url(&harness.state, content.id, true, None)
            .await
            .unwrap();
    assert_eq!(key, content.object_name);
    assert!(!processed);
    assert!(url.contains(&content.object_name));
    assert!(url.contains("expires=3600"));

    let processed_key = format!("processed/{}", content.object_name);
    ContentService::update_processed_content(&harness.state, content.id, &processed_key)
        .await
        .unwrap();

    let (_, key, processed) =
        ContentService::get_content_url(&harness.state, content.id, true, Some(60))
            .await
            .unwrap();
    assert_eq!(key, processed_key);
    assert!(processed);

    // Raw remains reachable when the flag is off.
    let (_, key, processed) =
        ContentService::get_content_url(&harness.state, content.id, false, None)
            .await
            .unwrap();
    assert_eq!(key, content.object_name);
    assert!(!processed);
}

#[tokio::test]
async fn url_for_unknown_content_is_not_found() {
    let harness = test_state();
    let err = ContentService::get_content_url(&harness.state, Uuid::new_v4(), false, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_row_and_both_objects() {
    let harness = test_state();
    let content = upload_sample(&harness).await;
    let processed_key = format!("processed/{}", content.object_name);
    harness
        .storage
        .insert(&processed_key, Bytes::from_static(b"processed"), "image/png");
    ContentService::update_processed_content(&harness.state, content.id, &processed_key)
        .await
        .unwrap();

    ContentService::delete_content(&harness.state, content.id)
        .await
        .unwrap();

    assert_eq!(harness.content.row_count(), 0);
    assert!(!harness.storage.contains(&content.object_name));
    assert!(!harness.storage.contains(&processed_key));
}

#[tokio::test]
async fn delete_unknown_content_is_not_found() {
    let harness = test_state();
    let err = ContentService::delete_content(&harness.state, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
