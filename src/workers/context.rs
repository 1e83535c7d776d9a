use std::sync::Arc;

use crate::infrastructure::storage::ObjectStore;
use crate::modules::task::repository::TaskStore;
use crate::workers::callback::CompletionNotifier;
use crate::workers::transform::MediaTransform;

/// Everything a worker needs, injected at process startup. The worker shares
/// nothing else with the ingestion side — Content rows are only reached
/// through the completion callback.
#[derive(Clone)]
pub struct WorkerContext {
    pub storage: Arc<dyn ObjectStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub transform: Arc<dyn MediaTransform>,
    pub notifier: Arc<dyn CompletionNotifier>,
}
