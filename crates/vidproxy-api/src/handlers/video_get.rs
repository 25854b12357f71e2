use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use vidproxy_core::constants::UNTITLED;
use vidproxy_core::models::VideoLinkResponse;
use vidproxy_core::AppError;
use vidproxy_storage::StorageError;

#[utoipa::path(
    get,
    path = "/videos/{key}",
    tag = "videos",
    params(
        ("key" = String, Path, description = "Object key returned by the upload, e.g. videos/<uuid>_clip.mp4")
    ),
    responses(
        (status = 200, description = "Fresh link to the video", body = VideoLinkResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_video"))]
pub async fn get_video(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<VideoLinkResponse>, HttpAppError> {
    let head = state.storage.head(&key).await.map_err(|e| match e {
        StorageError::NotFound(_) => HttpAppError(AppError::NotFound("Video not found".to_string())),
        other => other.into(),
    })?;

    let title = head
        .metadata_value(state.config.title_metadata_key())
        .unwrap_or(UNTITLED)
        .to_string();

    let video_url = state
        .storage
        .get_presigned_url(&key, state.config.lookup_url_expiry())
        .await?;

    Ok(Json(VideoLinkResponse { video_url, title }))
}
