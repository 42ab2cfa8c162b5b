use std::path::{Path, PathBuf};

use thiserror::Error;

/// Largest photo accepted by the decor pipeline (6 MiB).
pub const MAX_UPLOAD_BYTES: usize = 6 * 1024 * 1024;

/// Exclusive upper bound of the random salt embedded in stored filenames.
pub const FILENAME_SALT_BOUND: u32 = 1_000_000;

/// Path prefix under which stored photos are served back.
pub const PUBLIC_UPLOADS_PATH: &str = "/uploads";

const IMAGE_MEDIA_PREFIX: &str = "image/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("unsupported media type: {media_type}")]
    UnsupportedMediaType { media_type: String },
    #[error("upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },
}

/// A photo received from a client, not yet checked or persisted.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub original_filename: Option<String>,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadCandidate {
    pub fn validate(self) -> Result<ValidatedUpload, UploadRejection> {
        check_media_type(&self.media_type)?;
        check_size(self.bytes.len())?;
        Ok(ValidatedUpload(self))
    }
}

/// An upload that passed [`UploadCandidate::validate`]. Only these can be stored.
#[derive(Debug, Clone)]
pub struct ValidatedUpload(UploadCandidate);

impl ValidatedUpload {
    pub fn media_type(&self) -> &str {
        &self.0.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    pub fn original_filename(&self) -> Option<&str> {
        self.0.original_filename.as_deref()
    }

    pub fn byte_size(&self) -> usize {
        self.0.bytes.len()
    }
}

/// A photo persisted under the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub generated_filename: String,
    pub source_media_type: String,
    pub byte_size: usize,
    pub storage_path: PathBuf,
}

pub fn check_media_type(media_type: &str) -> Result<(), UploadRejection> {
    let is_image = media_type
        .get(..IMAGE_MEDIA_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_MEDIA_PREFIX));

    if is_image {
        Ok(())
    } else {
        Err(UploadRejection::UnsupportedMediaType {
            media_type: media_type.to_string(),
        })
    }
}

pub fn check_size(size: usize) -> Result<(), UploadRejection> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::PayloadTooLarge {
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Build a stored filename: `<millisecond timestamp>-<salt><extension>`.
///
/// The extension (dot included) is taken from the client's filename, and only
/// when it is plain ASCII alphanumeric, so the result is always a single safe
/// path segment.
pub fn generate_filename(timestamp_ms: i64, salt: u32, original_filename: Option<&str>) -> String {
    let extension = original_filename.map(file_extension).unwrap_or_default();
    format!("{timestamp_ms}-{salt}{extension}")
}

fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
