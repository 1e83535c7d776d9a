use axum::http::StatusCode;
use thiserror::Error;

/// Pipeline error taxonomy.
///
/// `Publish` and `Callback` are best-effort failures: they are logged at the
/// point where they occur and never surface to the original caller once a
/// durable state change has already committed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("queue publish failed: {0}")]
    Publish(String),

    #[error("malformed job message: {0}")]
    Parse(String),

    #[error("processing failed: {0}")]
    Processing(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("callback delivery failed: {0}")]
    Callback(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Parse(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
