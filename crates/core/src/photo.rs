//! Profile photo rules.
//!
//! Photos are stored as raw bytes and travel as standard base64 text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serializer;

use crate::error::CoreError;

/// File extensions accepted for profile photo uploads (lowercase).
pub const ALLOWED_PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Validate an uploaded file name and return its lowercased extension.
///
/// The name must contain a `.` and end in one of
/// [`ALLOWED_PHOTO_EXTENSIONS`] (case-insensitive).
pub fn validate_photo_filename(filename: &str) -> Result<String, CoreError> {
    if filename.trim().is_empty() {
        return Err(CoreError::Validation("No selected file".into()));
    }

    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };

    if ALLOWED_PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "File type not allowed. Supported: {}",
            ALLOWED_PHOTO_EXTENSIONS
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Encode photo bytes for transport.
pub fn encode_photo(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// `serialize_with` helper for `Option<Vec<u8>>` photo columns.
///
/// Empty blobs serialize as `null`, same as absent ones.
pub fn serialize_photo<S: Serializer>(
    photo: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match photo {
        Some(bytes) if !bytes.is_empty() => serializer.serialize_str(&encode_photo(bytes)),
        _ => serializer.serialize_none(),
    }
}
