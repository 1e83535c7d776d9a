//! In-memory implementations of the pipeline seams, used by the flow tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use uuid::Uuid;

use media_pipeline::common::error::{ServiceError, ServiceResult};
use media_pipeline::config::settings::AppConfig;
use media_pipeline::infrastructure::queue::JobPublisher;
use media_pipeline::infrastructure::storage::ObjectStore;
use media_pipeline::modules::content::events::ProcessingJob;
use media_pipeline::modules::content::model::{Content, NewContent};
use media_pipeline::modules::content::repository::ContentStore;
use media_pipeline::modules::task::model::{TaskRecord, TaskStatus};
use media_pipeline::modules::task::repository::TaskStore;
use media_pipeline::state::AppState;
use media_pipeline::workers::callback::CompletionNotifier;
use media_pipeline::workers::transform::MediaTransform;

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, (Bytes, String)>>,
    pub fail_puts: AtomicBool,
}

impl MemoryObjectStore {
    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn bytes_of(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).map(|(b, _)| b.clone())
    }

    pub fn insert(&self, key: &str, data: Bytes, content_type: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (data, content_type.to_string()));
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> ServiceResult<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("simulated write failure".into()));
        }
        self.insert(key, data, content_type);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> ServiceResult<Bytes> {
        self.bytes_of(key)
            .ok_or_else(|| ServiceError::Storage(format!("no such object: {}", key)))
    }

    async fn delete_object(&self, key: &str) -> ServiceResult<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> ServiceResult<String> {
        Ok(format!(
            "http://object-store.test/{}?expires={}",
            key,
            expires_in.as_secs()
        ))
    }
}

#[derive(Default)]
pub struct MemoryContentStore {
    rows: Mutex<HashMap<Uuid, Content>>,
}

impl MemoryContentStore {
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn create(&self, new: NewContent) -> ServiceResult<Content> {
        let now = OffsetDateTime::now_utc();
        let content = Content {
            id: new.id,
            title: new.title,
            description: new.description,
            object_name: new.object_name,
            processed_object_name: None,
            content_type: new.content_type,
            file_size: new.file_size,
            uploaded_by: new.uploaded_by,
            is_processed: false,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(content.id, content.clone());
        Ok(content)
    }

    async fn get(&self, id: Uuid) -> ServiceResult<Option<Content>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> ServiceResult<Vec<Content>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn mark_processed(
        &self,
        id: Uuid,
        processed_object_name: &str,
    ) -> ServiceResult<Option<Content>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|content| {
            content.processed_object_name = Some(processed_object_name.to_string());
            content.is_processed = true;
            content.updated_at = OffsetDateTime::now_utc();
            content.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryTaskStore {
    rows: Mutex<Vec<TaskRecord>>,
    pub fail_creates: AtomicBool,
}

impl MemoryTaskStore {
    pub fn all(&self) -> Vec<TaskRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create_processing(
        &self,
        content_id: Uuid,
        object_name: &str,
    ) -> ServiceResult<TaskRecord> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(ServiceError::Database(sqlx::Error::PoolClosed));
        }
        let now = OffsetDateTime::now_utc();
        let task = TaskRecord {
            id: Uuid::new_v4(),
            content_id,
            object_name: object_name.to_string(),
            status: TaskStatus::Processing,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn finalize(&self, id: Uuid, status: TaskStatus) -> ServiceResult<Option<TaskRecord>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(task) = rows.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if !task.status.can_transition_to(status) {
            return Ok(None);
        }
        task.status = status;
        task.updated_at = OffsetDateTime::now_utc();
        Ok(Some(task.clone()))
    }

    async fn list(&self) -> ServiceResult<Vec<TaskRecord>> {
        Ok(self.all())
    }

    async fn get(&self, id: Uuid) -> ServiceResult<Option<TaskRecord>> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryJobPublisher {
    published: Mutex<Vec<ProcessingJob>>,
    pub fail: AtomicBool,
}

impl MemoryJobPublisher {
    pub fn published(&self) -> Vec<ProcessingJob> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobPublisher for MemoryJobPublisher {
    async fn publish_job(&self, job: &ProcessingJob) -> ServiceResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ServiceError::Publish("simulated queue outage".into()));
        }
        self.published.lock().unwrap().push(job.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(Uuid, String)>>,
    pub fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<(Uuid, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionNotifier for RecordingNotifier {
    async fn notify_processed(
        &self,
        content_id: Uuid,
        processed_object_name: &str,
    ) -> ServiceResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ServiceError::Callback("simulated webhook outage".into()));
        }
        self.calls
            .lock()
            .unwrap()
            .push((content_id, processed_object_name.to_string()));
        Ok(())
    }
}

pub struct FailingTransform;

#[async_trait]
impl MediaTransform for FailingTransform {
    async fn transform(&self, _data: Bytes, _content_type: &str) -> ServiceResult<Bytes> {
        Err(ServiceError::Processing("simulated codec failure".into()))
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "postgres://unused".into(),
        amqp_url: "amqp://unused".into(),
        processing_queue: "media.process".into(),
        minio_url: "http://unused".into(),
        minio_bucket: "media".into(),
        minio_access_key: "unused".into(),
        minio_secret_key: "unused".into(),
        callback_base_url: "http://localhost:3000".into(),
        presign_ttl_secs: 3600,
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub storage: Arc<MemoryObjectStore>,
    pub content: Arc<MemoryContentStore>,
    pub tasks: Arc<MemoryTaskStore>,
    pub queue: Arc<MemoryJobPublisher>,
}

pub fn test_state() -> TestHarness {
    let storage = Arc::new(MemoryObjectStore::default());
    let content = Arc::new(MemoryContentStore::default());
    let tasks = Arc::new(MemoryTaskStore::default());
    let queue = Arc::new(MemoryJobPublisher::default());

    let state = AppState::new(
        test_config(),
        content.clone(),
        tasks.clone(),
        storage.clone(),
        queue.clone(),
    );

    TestHarness {
        state,
        storage,
        content,
        tasks,
        queue,
    }
}
