use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{config::BehaviorVersion, config::Credentials, config::Region, Client};
use bytes::Bytes;
use tracing::info;

use crate::common::error::{ServiceError, ServiceResult};
use crate::infrastructure::storage::ObjectStore;

#[derive(Clone)]
pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    pub async fn new(endpoint: &str, bucket: &str, access_key: &str, secret_key: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        let client = Client::from_conf(config);

        info!("✅ Connected to S3 (MinIO)");

        Self {
            client,
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3StorageService {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> ServiceResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| ServiceError::Storage(format!("put {}: {}", key, e)))?;

        Ok(())
    }

    async fn get_object(&self, key: &str) -> ServiceResult<Bytes> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ServiceError::Storage(format!("get {}: {}", key, e)))?;

        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| ServiceError::Storage(format!("read {}: {}", key, e)))?;

        Ok(body.into_bytes())
    }

    async fn delete_object(&self, key: &str) -> ServiceResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ServiceError::Storage(format!("delete {}: {}", key, e)))?;

        Ok(())
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> ServiceResult<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| ServiceError::Storage(format!("presign config: {}", e)))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| ServiceError::Storage(format!("presign {}: {}", key, e)))?;

        Ok(presigned.uri().to_string())
    }
}
