//! Fixed service constants.
//!
//! These seed the matching fields of [`Config`](crate::Config); handlers read
//! the values from the config they are given.

use std::time::Duration;

/// Prefix every stored video key lives under.
pub const VIDEO_KEY_PREFIX: &str = "videos/";

/// Bucket used when `S3_BUCKET` is not set.
pub const DEFAULT_BUCKET: &str = "myvideouploadbucket2";

/// Browser origin allowed by the CORS layer when `CORS_ORIGIN` is not set.
pub const DEFAULT_CORS_ORIGIN: &str = "http://127.0.0.1:5500";

/// Lifetime of the signed URL returned right after an upload.
pub const UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(60 * 60);

/// Lifetime of the signed URL returned by a lookup.
pub const LOOKUP_URL_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// User metadata key holding the title. S3 exposes it as `x-amz-meta-title`.
pub const TITLE_METADATA_KEY: &str = "title";

/// Title reported when an object carries no title metadata at all.
pub const UNTITLED: &str = "(Untitled)";
