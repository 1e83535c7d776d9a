use axum::{Json, Router};
use utoipa::OpenApi;

use crate::docs::ApiDoc;
use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};

pub fn configure_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api-docs/openapi.json",
            axum::routing::get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route("/health", axum::routing::get(|| async { "ok" }))
        .nest("/content", crate::modules::content::router())
        .nest("/media-tasks", crate::modules::task::router())
        .layer(cors)
}
