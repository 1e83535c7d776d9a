use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use media_pipeline::config::settings::AppConfig;
use media_pipeline::infrastructure::db::pool::connect_to_db;
use media_pipeline::infrastructure::queue::rabbitmq::RabbitMqService;
use media_pipeline::infrastructure::storage::s3::S3StorageService;
use media_pipeline::modules::content::repository::PgContentStore;
use media_pipeline::modules::task::repository::PgTaskStore;
use media_pipeline::state::AppState;
use media_pipeline::workers::callback::HttpCallbackClient;
use media_pipeline::workers::context::WorkerContext;
use media_pipeline::workers::processor::start_media_worker;
use media_pipeline::workers::transform::PassthroughTransform;
use media_pipeline::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::new()?;

    let db = connect_to_db(&config.database_url).await?;
    sqlx::migrate!().run(&db).await?;

    let storage = Arc::new(
        S3StorageService::new(
            &config.minio_url,
            &config.minio_bucket,
            &config.minio_access_key,
            &config.minio_secret_key,
        )
        .await,
    );
    let queue = RabbitMqService::new(&config.amqp_url, &config.processing_queue).await?;

    let content = Arc::new(PgContentStore::new(db.clone()));
    let tasks = Arc::new(PgTaskStore::new(db.clone()));

    let state = AppState::new(
        config.clone(),
        content,
        tasks.clone(),
        storage.clone(),
        Arc::new(queue.clone()),
    );

    let worker_ctx = WorkerContext {
        storage,
        tasks,
        transform: Arc::new(PassthroughTransform),
        notifier: Arc::new(HttpCallbackClient::new(config.callback_base_url.clone())),
    };
    tokio::spawn(start_media_worker(queue, worker_ctx));

    let app = app::create_app(state).await;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
