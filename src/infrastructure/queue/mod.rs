use async_trait::async_trait;

use crate::common::error::ServiceResult;
use crate::modules::content::events::ProcessingJob;

pub mod rabbitmq;

/// Publisher half of the durable job queue.
///
/// Delivery is at-least-once; callers treat a publish failure as best-effort
/// (logged, never fatal to the request that triggered it).
#[async_trait]
pub trait JobPublisher: Send + Sync {
    async fn publish_job(&self, job: &ProcessingJob) -> ServiceResult<()>;
}
