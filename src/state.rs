use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::queue::JobPublisher;
use crate::infrastructure::storage::ObjectStore;
use crate::modules::content::repository::ContentStore;
use crate::modules::task::repository::TaskStore;

/// Shared dependencies, constructed once at startup and injected everywhere.
/// All clients sit behind traits so tests can swap in in-memory versions.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub content: Arc<dyn ContentStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub storage: Arc<dyn ObjectStore>,
    pub queue: Arc<dyn JobPublisher>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        content: Arc<dyn ContentStore>,
        tasks: Arc<dyn TaskStore>,
        storage: Arc<dyn ObjectStore>,
        queue: Arc<dyn JobPublisher>,
    ) -> Self {
        Self {
            config,
            content,
            tasks,
            storage,
            queue,
        }
    }
}
