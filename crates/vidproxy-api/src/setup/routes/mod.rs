//! Route configuration and setup.

pub mod health;

use crate::api_doc::ApiDoc;
use crate::error::HttpAppError;
use crate::handlers::{video_get, video_upload};
use crate::middleware::{error_details_middleware, ErrorDetailsConfig};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use vidproxy_core::{AppError, Config};

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let error_details_config = Arc::new(ErrorDetailsConfig::new(config.is_production()));

    let app = Router::new()
        .route("/upload", post(video_upload::upload_video))
        .route("/videos/{*key}", get(video_get::get_video))
        .route("/health", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(RapiDoc::new("/api/openapi.json").path("/docs"))
        .fallback(|| async {
            HttpAppError(AppError::NotFound("Route not found".to_string()))
        })
        .layer(axum::middleware::from_fn_with_state(
            error_details_config,
            error_details_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(config.max_video_size_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Exactly one origin, any method, any header.
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origin = HeaderValue::from_str(config.cors_origin())
        .map_err(|e| anyhow::anyhow!("Invalid CORS_ORIGIN '{}': {}", config.cors_origin(), e))?;

    tracing::info!(origin = %config.cors_origin(), "CORS enabled for a single origin");

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
