//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes::health;
use vidproxy_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "vidproxy API",
        version = "0.1.0",
        description = "Uploads videos to object storage and hands out time-limited links to them."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::video_get::get_video,
        health::liveness_check,
    ),
    components(
        schemas(
            models::UploadVideoResponse,
            models::VideoLinkResponse,
            health::LivenessResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video upload and link operations"),
        (name = "config", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_both_video_paths() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/upload"));
        assert!(spec.paths.paths.contains_key("/videos/{key}"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
