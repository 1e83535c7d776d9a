use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub mod handler;
pub mod model;
pub mod repository;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_tasks))
        .route("/{id}", get(handler::get_task))
}
