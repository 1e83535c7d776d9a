use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Content, NewContent};
use crate::common::error::ServiceResult;
use crate::infrastructure::db::pool::DbPool;

/// Persistence seam for Content rows. The ingestion service owns this data;
/// the worker never touches it directly (it goes through the webhook).
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn create(&self, new: NewContent) -> ServiceResult<Content>;

    async fn get(&self, id: Uuid) -> ServiceResult<Option<Content>>;

    async fn list(&self) -> ServiceResult<Vec<Content>>;

    /// Sets `processed_object_name` and flips `is_processed`. Returns `None`
    /// when the id is unknown. Safe to call repeatedly with the same key.
    async fn mark_processed(
        &self,
        id: Uuid,
        processed_object_name: &str,
    ) -> ServiceResult<Option<Content>>;

    /// Returns false when the id was unknown.
    async fn delete(&self, id: Uuid) -> ServiceResult<bool>;
}

#[derive(Clone)]
pub struct PgContentStore {
    pool: DbPool,
}

impl PgContentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn create(&self, new: NewContent) -> ServiceResult<Content> {
        let content = sqlx::query_as::<_, Content>(
            r#"
            INSERT INTO contents (id, title, description, object_name, content_type, file_size, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.object_name)
        .bind(&new.content_type)
        .bind(new.file_size)
        .bind(&new.uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(content)
    }

    async fn get(&self, id: Uuid) -> ServiceResult<Option<Content>> {
        let content = sqlx::query_as::<_, Content>("SELECT * FROM contents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(content)
    }

    async fn list(&self) -> ServiceResult<Vec<Content>> {
        let contents =
            sqlx::query_as::<_, Content>("SELECT * FROM contents ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(contents)
    }

    async fn mark_processed(
        &self,
        id: Uuid,
        processed_object_name: &str,
    ) -> ServiceResult<Option<Content>> {
        let content = sqlx::query_as::<_, Content>(
            r#"
            UPDATE contents
            SET
                processed_object_name = $2,
                is_processed = TRUE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(processed_object_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(content)
    }

    async fn delete(&self, id: Uuid) -> ServiceResult<bool> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
