//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Client mistakes
//! (400, 413) are answered with a plain-text reason; everything else renders as
//! a JSON `ErrorResponse`.
//!
//! The rendered body never carries internal details. For non-sensitive errors
//! the detailed body rides along as a [`DetailedErrorBody`] extension, and
//! `middleware::error_details` swaps it in outside production.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use vidproxy_core::{AppError, ErrorMetadata, LogLevel};
use vidproxy_storage::StorageError;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Body with `details` and `error_type` filled in, attached to error responses
/// whose cause is safe to show.
#[derive(Debug, Clone)]
pub struct DetailedErrorBody(pub ErrorResponse);

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: AppError lives in vidproxy-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::UploadFailed(msg) | StorageError::BackendError(msg) => {
                AppError::Storage(msg)
            }
            StorageError::InvalidKey(msg) => AppError::BadRequest(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

/// Client errors answered with a bare text reason.
fn is_plain_text(error: &AppError) -> bool {
    matches!(error, AppError::BadRequest(_) | AppError::PayloadTooLarge(_))
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        if is_plain_text(app_error) {
            return (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                app_error.client_message(),
            )
                .into_response();
        }

        let body = ErrorResponse {
            error: app_error.client_message(),
            details: None,
            error_type: None,
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };

        let detailed = (!app_error.is_sensitive()).then(|| {
            DetailedErrorBody(ErrorResponse {
                details: Some(app_error.to_string()),
                error_type: Some(app_error.error_type().to_string()),
                ..body.clone()
            })
        });

        let mut response = (status, Json(body)).into_response();
        if let Some(detailed) = detailed {
            response.extensions_mut().insert(detailed);
        }
        response
    }
}
