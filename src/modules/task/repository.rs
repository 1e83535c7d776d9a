use async_trait::async_trait;
use uuid::Uuid;

use super::model::{TaskRecord, TaskStatus};
use crate::common::error::ServiceResult;
use crate::infrastructure::db::pool::DbPool;

/// Persistence seam for processing attempts. Writes happen only inside the
/// worker; the HTTP surface is read-only.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a record already claimed by a worker (status = processing).
    /// There is no externally observable pending state.
    async fn create_processing(
        &self,
        content_id: Uuid,
        object_name: &str,
    ) -> ServiceResult<TaskRecord>;

    /// Moves a task into a terminal state. Guarded: a task already in a
    /// terminal state is left untouched and `None` is returned.
    async fn finalize(&self, id: Uuid, status: TaskStatus) -> ServiceResult<Option<TaskRecord>>;

    async fn list(&self) -> ServiceResult<Vec<TaskRecord>>;

    async fn get(&self, id: Uuid) -> ServiceResult<Option<TaskRecord>>;
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: DbPool,
}

impl PgTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create_processing(
        &self,
        content_id: Uuid,
        object_name: &str,
    ) -> ServiceResult<TaskRecord> {
        let task = sqlx::query_as::<_, TaskRecord>(
            r#"
            INSERT INTO media_tasks (id, content_id, object_name, status)
            VALUES ($1, $2, $3, 'processing')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(content_id)
        .bind(object_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn finalize(&self, id: Uuid, status: TaskStatus) -> ServiceResult<Option<TaskRecord>> {
        // The WHERE clause enforces the monotonic status invariant at the row
        // level even when concurrent workers race on redelivered messages.
        let task = sqlx::query_as::<_, TaskRecord>(
            r#"
            UPDATE media_tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'processing')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list(&self) -> ServiceResult<Vec<TaskRecord>> {
        let tasks =
            sqlx::query_as::<_, TaskRecord>("SELECT * FROM media_tasks ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(tasks)
    }

    async fn get(&self, id: Uuid) -> ServiceResult<Option<TaskRecord>> {
        let task = sqlx::query_as::<_, TaskRecord>("SELECT * FROM media_tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }
}
