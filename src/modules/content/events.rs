use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::{ServiceError, ServiceResult};

/// Unit of work handed to the processing queue. Exists only on the wire; its
/// contents seed a TaskRecord on the worker side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingJob {
    pub content_id: Uuid,
    pub object_name: String,
    pub content_type: String,
}

impl ProcessingJob {
    /// Strict parse of a raw queue payload. Anything that does not carry all
    /// three required fields is rejected so the consumer can drop it.
    pub fn from_bytes(raw: &[u8]) -> ServiceResult<Self> {
        serde_json::from_slice(raw).map_err(|e| ServiceError::Parse(e.to_string()))
    }
}
