use utoipa::OpenApi;

use crate::modules::content::dto::*;
use crate::modules::content::model::Content;
use crate::modules::task::model::{TaskRecord, TaskStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::content::handler::upload_content,
        crate::modules::content::handler::list_contents,
        crate::modules::content::handler::get_content,
        crate::modules::content::handler::get_content_url,
        crate::modules::content::handler::processing_complete,
        crate::modules::content::handler::delete_content,
        crate::modules::task::handler::list_tasks,
        crate::modules::task::handler::get_task,
    ),
    components(
        schemas(
            Content,
            UploadContentResponse,
            ContentUrlResponse,
            ProcessingCompleteRequest,
            TaskRecord,
            TaskStatus,
        )
    ),
    tags(
        (name = "Content", description = "Media ingestion and retrieval"),
        (name = "Tasks", description = "Processing task status")
    )
)]
pub struct ApiDoc;
