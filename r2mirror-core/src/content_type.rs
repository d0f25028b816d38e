//! Content type inference for uploaded objects.

use crate::types::UploadMetadata;

/// Fallback when the file name gives no hint.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Every mirrored object is served inline rather than as a download.
pub const INLINE_DISPOSITION: &str = "inline";

/// Guesses a MIME type from the file name at the end of `key`.
pub fn infer_content_type(key: &str) -> String {
    mime_guess::from_path(file_name(key))
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

/// Upload metadata for `key`: inferred content type, inline disposition.
pub fn upload_metadata_for(key: &str) -> UploadMetadata {
    UploadMetadata {
        content_type: infer_content_type(key),
        content_disposition: INLINE_DISPOSITION.to_string(),
    }
}

/// Last path segment of an object key.
pub fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
