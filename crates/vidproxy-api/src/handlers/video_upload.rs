use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{
    extract_video_upload, has_form_content_type, is_multipart, EXPECTED_FORM_CONTENT,
    NO_FILE_UPLOADED,
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;
use vidproxy_core::models::UploadVideoResponse;
use vidproxy_core::AppError;
use vidproxy_storage::keys::generate_video_key;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Form with a `file` part and an optional `title` field"),
    responses(
        (status = 200, description = "Video stored", body = UploadVideoResponse),
        (status = 400, description = "Not a form, or no usable file", body = String, content_type = "text/plain"),
        (status = 413, description = "File too large", body = String, content_type = "text/plain"),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadVideoResponse>, HttpAppError> {
    if !has_form_content_type(&headers) {
        return Err(AppError::BadRequest(EXPECTED_FORM_CONTENT.to_string()).into());
    }

    let multipart = match multipart {
        Ok(multipart) => multipart,
        // A url-encoded form is a form, but it has no file parts.
        Err(_) if !is_multipart(&headers) => {
            return Err(AppError::BadRequest(NO_FILE_UPLOADED.to_string()).into())
        }
        Err(rejection) => return Err(AppError::BadRequest(rejection.body_text()).into()),
    };

    let upload = extract_video_upload(multipart).await?;
    let video_key = generate_video_key(&upload.file_name);
    let size = upload.data.len();

    let metadata = HashMap::from([(
        state.config.title_metadata_key().to_string(),
        upload.title.clone(),
    )]);

    state
        .storage
        .upload_with_key(&video_key, upload.data, &upload.content_type, &metadata)
        .await?;

    // No compensating delete: if signing fails the object stays in the bucket.
    let video_url = state
        .storage
        .get_presigned_url(&video_key, state.config.upload_url_expiry())
        .await?;

    tracing::info!(
        key = %video_key,
        size_bytes = size,
        content_type = %upload.content_type,
        "Video uploaded"
    );

    Ok(Json(UploadVideoResponse {
        video_key,
        video_url,
        title: upload.title,
    }))
}
