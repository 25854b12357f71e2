//! Shared key generation for storage backends.
//!
//! Key format: `videos/{uuid}_{file_name}`.

use crate::traits::{StorageError, StorageResult};
use object_store::path::Path;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use uuid::Uuid;
use vidproxy_core::constants::VIDEO_KEY_PREFIX;

/// Reduce a client-supplied file name to its final path component.
///
/// Some browsers send the full local path; only the last segment is kept.
/// Returns `None` when nothing usable remains.
pub fn file_name_component(file_name: &str) -> Option<&str> {
    let name = file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name)
        .trim();

    match name {
        "" | "." | ".." => None,
        other => Some(other),
    }
}

/// Generate a fresh storage key for an uploaded video.
///
/// Every call yields a different key, even for the same file name.
pub fn generate_video_key(file_name: &str) -> String {
    format!("{}{}_{}", VIDEO_KEY_PREFIX, Uuid::new_v4(), file_name)
}

/// Reject keys that cannot address an object in the bucket.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey(
            "Storage key must not be empty".to_string(),
        ));
    }
    if storage_key.starts_with('/')
        || storage_key.ends_with('/')
        || storage_key.split('/').any(|part| part == "..")
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Everything except RFC 3986 unreserved characters gets escaped.
const KEY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Address `storage_key` in the object store exactly as written.
///
/// `Path::from` would percent-encode characters such as `[` or `%` and store
/// the object under a different name than the caller was given.
pub(crate) fn object_path(storage_key: &str) -> StorageResult<Path> {
    validate_key(storage_key)?;
    Path::parse(storage_key)
        .map_err(|e| StorageError::InvalidKey(format!("{}: {}", storage_key, e)))
}

/// Percent-encode each segment of a key for use in a URL path.
pub fn url_encode_key(storage_key: &str) -> String {
    storage_key
        .split('/')
        .map(|segment| utf8_percent_encode(segment, KEY_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
