use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UploadVideoResponse {
    /// Object key, `videos/<uuid>_<file name>`
    pub video_key: String,
    /// Signed GET URL, valid for one hour
    pub video_url: String,
    pub title: String,
}

/// Body returned by a lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct VideoLinkResponse {
    /// Signed GET URL, valid for fifteen minutes
    pub video_url: String,
    pub title: String,
}
