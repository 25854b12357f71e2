//! Common utilities for the upload handler

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::{header, HeaderMap, StatusCode};
use bytes::Bytes;
use vidproxy_core::AppError;
use vidproxy_storage::keys::file_name_component;

pub const NO_FILE_UPLOADED: &str = "No file uploaded.";
pub const EXPECTED_FORM_CONTENT: &str = "Expected form content.";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// One buffered upload, dropped once the request completes.
#[derive(Debug)]
pub struct VideoUpload {
    pub data: Bytes,
    pub file_name: String,
    pub content_type: String,
    pub title: String,
}

fn media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next().unwrap_or(value).trim();
    Some(essence.to_ascii_lowercase())
}

/// True for `multipart/form-data` and `application/x-www-form-urlencoded`.
pub fn has_form_content_type(headers: &HeaderMap) -> bool {
    matches!(
        media_type(headers).as_deref(),
        Some("multipart/form-data") | Some("application/x-www-form-urlencoded")
    )
}

pub fn is_multipart(headers: &HeaderMap) -> bool {
    media_type(headers).as_deref() == Some("multipart/form-data")
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File too large.".to_string())
    } else {
        AppError::BadRequest(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Read the `file` part and the optional `title` field.
///
/// Parts named `file` without a file name are ignored, so they count as a
/// missing file. Repeated `title` fields are joined with commas.
pub async fn extract_video_upload(mut multipart: Multipart) -> Result<VideoUpload, AppError> {
    let mut file: Option<(Bytes, String, String)> = None;
    let mut titles: Vec<String> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                let Some(raw_name) = field.file_name().map(|s| s.to_string()) else {
                    continue;
                };
                if file.is_some() {
                    return Err(AppError::BadRequest(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((data, raw_name, content_type));
            }
            "title" => titles.push(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let (data, raw_name, content_type) =
        file.ok_or_else(|| AppError::BadRequest(NO_FILE_UPLOADED.to_string()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest(NO_FILE_UPLOADED.to_string()));
    }
    let file_name = file_name_component(&raw_name)
        .ok_or_else(|| AppError::BadRequest(NO_FILE_UPLOADED.to_string()))?
        .to_string();

    Ok(VideoUpload {
        data,
        file_name,
        content_type,
        title: titles.join(","),
    })
}
