use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod events;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handler::upload_content))
        .route("/", get(handler::list_contents))
        .route(
            "/{id}",
            get(handler::get_content).delete(handler::delete_content),
        )
        .route("/{id}/url", get(handler::get_content_url))
        .route(
            "/webhook/processing-complete",
            post(handler::processing_complete),
        )
}
