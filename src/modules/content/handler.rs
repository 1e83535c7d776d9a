use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::modules::content::dto::*;
use crate::modules::content::service::ContentService;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Form,
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

const ANONYMOUS_UPLOADER: &str = "anonymous";

fn uploader_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_UPLOADER)
        .to_string()
}

/// Upload a media file
/// Multipart upload; the raw bytes land in the object store, a Content row is
/// created and a processing job is dispatched.
#[utoipa::path(
    post,
    path = "/content/upload",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Content created", body = ApiResponse<UploadContentResponse>),
        (status = 400, description = "Bad Request"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Content"
)]
pub async fn upload_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let uploaded_by = uploader_from_headers(&headers);

    let mut file: Option<(Bytes, String, String)> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((bytes, content_type, filename)),
                    Err(e) => {
                        return ApiError(
                            format!("Failed to read file field: {}", e),
                            StatusCode::BAD_REQUEST,
                        )
                        .into_response()
                    }
                }
            }
            "title" => title = field.text().await.ok(),
            "description" => description = field.text().await.ok().filter(|d| !d.is_empty()),
            _ => {}
        }
    }

    let Some((bytes, content_type, filename)) = file else {
        return ApiError(
            "No file field found in multipart request".to_string(),
            StatusCode::BAD_REQUEST,
        )
        .into_response();
    };
    let Some(title) = title.filter(|t| !t.is_empty()) else {
        return ApiError("Missing title field".to_string(), StatusCode::BAD_REQUEST)
            .into_response();
    };

    info!("Receiving upload '{}' from {}", filename, uploaded_by);

    match ContentService::upload_content(
        &state,
        bytes,
        content_type,
        &filename,
        title,
        description,
        uploaded_by,
    )
    .await
    {
        Ok(content) => ApiSuccess(
            ApiResponse::success(
                UploadContentResponse { content },
                "Content uploaded successfully",
            ),
            StatusCode::CREATED,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/content",
    responses(
        (status = 200, description = "List content", body = ApiResponse<Vec<super::model::Content>>),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Content"
)]
pub async fn list_contents(State(state): State<AppState>) -> impl IntoResponse {
    match ContentService::list_contents(&state).await {
        Ok(res) => ApiSuccess(
            ApiResponse::success(res, "Content retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/content/{id}",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Get content", body = ApiResponse<super::model::Content>),
        (status = 404, description = "Content not found")
    ),
    tag = "Content"
)]
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match ContentService::get_content(&state, id).await {
        Ok(res) => ApiSuccess(
            ApiResponse::success(res, "Content retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Presigned URL for a content object
/// Resolves to the processed object only when it exists; otherwise the raw
/// object, regardless of the `useProcessed` flag.
#[utoipa::path(
    get,
    path = "/content/{id}/url",
    params(
        ("id" = Uuid, Path, description = "Content ID"),
        ("useProcessed" = Option<bool>, Query, description = "Prefer the processed object"),
        ("ttl" = Option<u64>, Query, description = "URL TTL in seconds (default 3600)")
    ),
    responses(
        (status = 200, description = "Presigned URL", body = ApiResponse<ContentUrlResponse>),
        (status = 404, description = "Content not found")
    ),
    tag = "Content"
)]
pub async fn get_content_url(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ContentUrlQuery>,
) -> impl IntoResponse {
    match ContentService::get_content_url(&state, id, query.use_processed, query.ttl).await {
        Ok((url, object_name, processed)) => ApiSuccess(
            ApiResponse::success(
                ContentUrlResponse {
                    url,
                    object_name,
                    processed,
                },
                "URL generated successfully",
            ),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Processing-complete webhook
/// Invoked by the media worker once the processed artifact is in storage.
/// Idempotent; repeated deliveries are acknowledged without side effects.
#[utoipa::path(
    post,
    path = "/content/webhook/processing-complete",
    request_body(content = ProcessingCompleteRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Content marked processed", body = ApiResponse<super::model::Content>),
        (status = 404, description = "Content not found")
    ),
    tag = "Content"
)]
pub async fn processing_complete(
    State(state): State<AppState>,
    Form(req): Form<ProcessingCompleteRequest>,
) -> impl IntoResponse {
    match ContentService::update_processed_content(
        &state,
        req.content_id,
        &req.processed_object_name,
    )
    .await
    {
        Ok(content) => ApiSuccess(
            ApiResponse::success(content, "Content marked as processed"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/content/{id}",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content deleted"),
        (status = 404, description = "Content not found")
    ),
    tag = "Content"
)]
pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match ContentService::delete_content(&state, id).await {
        Ok(_) => ApiSuccess(ApiResponse::success((), "Content deleted"), StatusCode::OK)
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
