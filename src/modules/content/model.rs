use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// One uploaded media item and its processing state.
///
/// Invariant: `is_processed` is true iff `processed_object_name` is set. Both
/// are mutated together by the processing-complete webhook.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub object_name: String,
    pub processed_object_name: Option<String>,
    pub content_type: String,
    pub file_size: i64,
    pub uploaded_by: String,
    pub is_processed: bool,
    #[schema(value_type = String, format = Date)]
    pub created_at: OffsetDateTime,
    #[schema(value_type = String, format = Date)]
    pub updated_at: OffsetDateTime,
}

/// Fields persisted at upload time. Timestamps and the processing flag are
/// filled in by the store.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub object_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub uploaded_by: String,
}
