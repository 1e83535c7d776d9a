use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use super::events::ProcessingJob;
use super::model::{Content, NewContent};
use crate::common::error::{ServiceError, ServiceResult};
use crate::state::AppState;

pub struct ContentService;

impl ContentService {
    /// Raw storage key: random id plus the original file extension. The
    /// original filename itself never reaches the object store.
    fn generate_object_name(original_filename: &str) -> String {
        let id = Uuid::new_v4();
        match std::path::Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
        {
            Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext.to_lowercase()),
            _ => id.to_string(),
        }
    }

    /// Writes the bytes to the object store, persists the Content row, then
    /// publishes the processing job. Publish is best-effort: a queue outage
    /// leaves the content unprocessed but the upload still succeeds. A
    /// storage failure aborts before any row is created.
    pub async fn upload_content(
        state: &AppState,
        file_bytes: Bytes,
        content_type: String,
        original_filename: &str,
        title: String,
        description: Option<String>,
        uploaded_by: String,
    ) -> ServiceResult<Content> {
        let object_name = Self::generate_object_name(original_filename);
        let file_size = file_bytes.len() as i64;

        state
            .storage
            .put_object(&object_name, file_bytes, &content_type)
            .await?;

        info!("Stored upload as object: {}", object_name);

        let content = state
            .content
            .create(NewContent {
                id: Uuid::new_v4(),
                title,
                description,
                object_name: object_name.clone(),
                content_type: content_type.clone(),
                file_size,
                uploaded_by,
            })
            .await?;

        let job = ProcessingJob {
            content_id: content.id,
            object_name,
            content_type,
        };

        if let Err(e) = state.queue.publish_job(&job).await {
            // Accepted risk: the content stays unprocessed until the job is
            // re-dispatched by other means.
            warn!(
                "Failed to publish processing job for content {}: {}",
                content.id, e
            );
        }

        Ok(content)
    }

    pub async fn list_contents(state: &AppState) -> ServiceResult<Vec<Content>> {
        state.content.list().await
    }

    pub async fn get_content(state: &AppState, id: Uuid) -> ServiceResult<Content> {
        state
            .content
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("content {}", id)))
    }

    /// Presigned URL for the raw or processed object. Falls back to the raw
    /// object whenever the processed variant is not available yet, whatever
    /// the caller asked for.
    pub async fn get_content_url(
        state: &AppState,
        id: Uuid,
        use_processed: bool,
        ttl: Option<u64>,
    ) -> ServiceResult<(String, String, bool)> {
        let content = Self::get_content(state, id).await?;

        let (key, processed) = match (&content.processed_object_name, use_processed) {
            (Some(processed_key), true) if content.is_processed => (processed_key.clone(), true),
            _ => (content.object_name.clone(), false),
        };

        let ttl_secs = ttl.unwrap_or(state.config.presign_ttl_secs);
        let url = state
            .storage
            .presigned_get_url(&key, Duration::from_secs(ttl_secs))
            .await?;

        Ok((url, key, processed))
    }

    /// Webhook handler body. Idempotent: repeated callbacks with the same
    /// processed key converge to the same row state without error.
    pub async fn update_processed_content(
        state: &AppState,
        id: Uuid,
        processed_object_name: &str,
    ) -> ServiceResult<Content> {
        let updated = state
            .content
            .mark_processed(id, processed_object_name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("content {}", id)))?;

        info!(
            "Content {} marked processed with object {}",
            id, processed_object_name
        );
        Ok(updated)
    }

    /// Deletes the blobs best-effort, then the metadata row. Object-store
    /// failures are logged and do not block the row deletion.
    pub async fn delete_content(state: &AppState, id: Uuid) -> ServiceResult<()> {
        let content = Self::get_content(state, id).await?;

        if let Err(e) = state.storage.delete_object(&content.object_name).await {
            warn!("Failed to delete raw object {}: {}", content.object_name, e);
        }
        if let Some(processed) = &content.processed_object_name {
            if let Err(e) = state.storage.delete_object(processed).await {
                warn!("Failed to delete processed object {}: {}", processed, e);
            }
        }

        state.content.delete(id).await?;
        Ok(())
    }
}
