use async_trait::async_trait;
use uuid::Uuid;

use crate::common::error::{ServiceError, ServiceResult};

pub const PROCESSING_COMPLETE_PATH: &str = "/content/webhook/processing-complete";

/// Completion notification back to the ingestion side. Delivery failures are
/// the caller's problem to log; the worker never retries them.
#[async_trait]
pub trait CompletionNotifier: Send + Sync {
    async fn notify_processed(
        &self,
        content_id: Uuid,
        processed_object_name: &str,
    ) -> ServiceResult<()>;
}

/// Form-encoded POST to the ingestion service's webhook endpoint.
pub struct HttpCallbackClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCallbackClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CompletionNotifier for HttpCallbackClient {
    async fn notify_processed(
        &self,
        content_id: Uuid,
        processed_object_name: &str,
    ) -> ServiceResult<()> {
        let url = format!("{}{}", self.base_url, PROCESSING_COMPLETE_PATH);
        let content_id = content_id.to_string();

        let response = self
            .client
            .post(&url)
            .form(&[
                ("contentId", content_id.as_str()),
                ("processedObjectName", processed_object_name),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::Callback(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServiceError::Callback(format!(
                "webhook returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
