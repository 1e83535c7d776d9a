use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of one processing attempt. Transitions are monotonic along
/// pending → processing → {completed | failed}; terminal states never move.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        match (self, next) {
            (TaskStatus::Pending, TaskStatus::Processing) => true,
            (TaskStatus::Pending, TaskStatus::Completed) => false,
            (TaskStatus::Pending, TaskStatus::Failed) => false,
            (TaskStatus::Processing, TaskStatus::Completed) => true,
            (TaskStatus::Processing, TaskStatus::Failed) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

/// One record per processing attempt. Retained for audit; the pipeline never
/// deletes these. Under queue redelivery the same content id can legally
/// appear on several records.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct TaskRecord {
    pub id: Uuid,
    pub content_id: Uuid,
    pub object_name: String,
    pub status: TaskStatus,
    #[schema(value_type = String, format = Date)]
    pub created_at: OffsetDateTime,
    #[schema(value_type = String, format = Date)]
    pub updated_at: OffsetDateTime,
}
