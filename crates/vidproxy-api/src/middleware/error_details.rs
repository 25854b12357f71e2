use crate::error::DetailedErrorBody;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ErrorDetailsConfig {
    pub is_production: bool,
}

impl ErrorDetailsConfig {
    pub fn new(is_production: bool) -> Self {
        Self { is_production }
    }
}

/// Outside production, replace JSON error bodies with their detailed form.
pub async fn error_details_middleware(
    State(config): State<Arc<ErrorDetailsConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let detailed = response.extensions_mut().remove::<DetailedErrorBody>();
    match detailed {
        Some(DetailedErrorBody(body)) if !config.is_production => {
            let status = response.status();
            (status, Json(body)).into_response()
        }
        _ => response,
    }
}
