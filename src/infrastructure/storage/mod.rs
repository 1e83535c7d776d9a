use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::common::error::ServiceResult;

pub mod s3;

/// Key-addressed blob storage.
///
/// The ingestion service chooses raw keys, the worker derives processed keys
/// from them; this trait does not interpret keys beyond passing them through.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> ServiceResult<()>;

    async fn get_object(&self, key: &str) -> ServiceResult<Bytes>;

    async fn delete_object(&self, key: &str) -> ServiceResult<()>;

    /// Time-limited presigned GET URL for direct client access.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> ServiceResult<String>;
}
