use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadContentResponse {
    pub content: super::model::Content,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContentUrlResponse {
    pub url: String,
    pub object_name: String,
    pub processed: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentUrlQuery {
    #[serde(default)]
    pub use_processed: bool,
    /// TTL in seconds; defaults to the configured presign TTL (1 hour).
    pub ttl: Option<u64>,
}

/// Worker callback body. Form-encoded:
/// `contentId=<id>&processedObjectName=<key>`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingCompleteRequest {
    pub content_id: Uuid,
    pub processed_object_name: String,
}
