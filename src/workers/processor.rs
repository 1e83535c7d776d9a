use futures_util::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicNackOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use crate::modules::content::events::ProcessingJob;
use crate::modules::task::model::TaskStatus;
use crate::workers::context::WorkerContext;

/// Processed keys are derived from the raw key alone, so the processed
/// location is predictable without any lookup.
pub const PROCESSED_PREFIX: &str = "processed/";

pub fn processed_object_name(object_name: &str) -> String {
    format!("{}{}", PROCESSED_PREFIX, object_name)
}

/// Outcome of one dequeued message.
#[derive(Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Artifact uploaded, task completed, callback attempted.
    Completed { task_id: Uuid, processed_key: String },
    /// Download, transform or upload failed; task finalized as failed.
    Failed { task_id: Uuid },
    /// Message did not parse; dropped without a task record.
    Discarded,
    /// Valid job, but no durable record could be written; the message goes
    /// back to the queue for redelivery.
    Retry,
}

/// Blocking consume loop. One message at a time per consumer; competing
/// worker processes scale the pipeline horizontally. Messages are acked
/// after the outcome is durably recorded, so a crash mid-flight leads to
/// redelivery (and a fresh TaskRecord) elsewhere.
pub async fn start_media_worker(queue: RabbitMqService, ctx: WorkerContext) {
    info!("🎞️ Starting media worker...");

    let queue_name = queue.queue_name().to_string();
    let channel = queue.get_channel().await;
    let channel_guard = channel.lock().await;

    let _queue = channel_guard
        .queue_declare(
            &queue_name,
            QueueDeclareOptions {
                durable: true,
                ..QueueDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await
        .expect("Failed to declare queue");

    let mut consumer = channel_guard
        .basic_consume(
            &queue_name,
            "media_worker",
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await
        .expect("Failed to create consumer");

    drop(channel_guard);

    info!("🎞️ Media worker listening on '{}'", queue_name);

    while let Some(delivery) = consumer.next().await {
        if let Ok(delivery) = delivery {
            let outcome = process_message(&ctx, &delivery.data).await;
            match &outcome {
                TaskOutcome::Completed {
                    task_id,
                    processed_key,
                } => {
                    info!("✅ Task {} completed, artifact at {}", task_id, processed_key);
                }
                TaskOutcome::Failed { task_id } => {
                    error!("❌ Task {} failed", task_id);
                }
                TaskOutcome::Discarded => {
                    warn!("Dropped malformed queue message");
                }
                TaskOutcome::Retry => {
                    warn!("Returning job to the queue for redelivery");
                }
            }

            // Ack only outcomes that are durably settled (terminal task or
            // deliberate drop). A valid job with no record yet is nacked
            // back onto the queue instead.
            let settle = if matches!(outcome, TaskOutcome::Retry) {
                delivery
                    .nack(BasicNackOptions {
                        requeue: true,
                        ..BasicNackOptions::default()
                    })
                    .await
            } else {
                delivery.ack(BasicAckOptions::default()).await
            };
            if let Err(e) = settle {
                error!("Failed to settle message: {}", e);
            }
        }
    }
}

/// Handles one raw queue payload end to end:
/// parse → TaskRecord(processing) → download → transform → upload →
/// TaskRecord(completed) → callback. Failures after the task exists finalize
/// it as failed and skip the callback; a failure before any record exists
/// asks for redelivery instead.
pub async fn process_message(ctx: &WorkerContext, raw: &[u8]) -> TaskOutcome {
    let job = match ProcessingJob::from_bytes(raw) {
        Ok(job) => job,
        Err(e) => {
            warn!("Failed to parse job message: {}", e);
            return TaskOutcome::Discarded;
        }
    };

    info!(
        "📦 Received processing job for content {} ({})",
        job.content_id, job.object_name
    );

    let task = match ctx
        .tasks
        .create_processing(job.content_id, &job.object_name)
        .await
    {
        Ok(task) => task,
        Err(e) => {
            // No durable record yet; the consume loop nacks so the queue
            // redelivers the job intact.
            error!("Failed to create task record: {}", e);
            return TaskOutcome::Retry;
        }
    };

    match run_transformation(ctx, &job).await {
        Ok(processed_key) => {
            if let Err(e) = ctx.tasks.finalize(task.id, TaskStatus::Completed).await {
                error!("Failed to finalize task {}: {}", task.id, e);
                return TaskOutcome::Failed { task_id: task.id };
            }

            // Best-effort: the artifact is already durable in storage; a lost
            // callback leaves the content unprocessed from the caller's view.
            if let Err(e) = ctx
                .notifier
                .notify_processed(job.content_id, &processed_key)
                .await
            {
                warn!(
                    "Completion callback for content {} failed: {}",
                    job.content_id, e
                );
            }

            TaskOutcome::Completed {
                task_id: task.id,
                processed_key,
            }
        }
        Err(e) => {
            error!(
                "Processing failed for content {}: {}",
                job.content_id, e
            );
            if let Err(e) = ctx.tasks.finalize(task.id, TaskStatus::Failed).await {
                error!("Failed to finalize task {}: {}", task.id, e);
            }
            TaskOutcome::Failed { task_id: task.id }
        }
    }
}

async fn run_transformation(
    ctx: &WorkerContext,
    job: &ProcessingJob,
) -> crate::common::error::ServiceResult<String> {
    let raw_bytes = ctx.storage.get_object(&job.object_name).await?;
    info!("⬇️ Downloaded {} bytes from {}", raw_bytes.len(), job.object_name);

    let transformed = ctx.transform.transform(raw_bytes, &job.content_type).await?;

    let processed_key = processed_object_name(&job.object_name);
    ctx.storage
        .put_object(&processed_key, transformed, &job.content_type)
        .await?;

    Ok(processed_key)
}
