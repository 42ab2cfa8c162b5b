use async_trait::async_trait;

use super::StorageError;
use crate::domain::uploads::{UploadedAsset, ValidatedUpload};

/// Append-only store for accepted photos.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist the upload under a freshly generated, never reused filename.
    async fn store(&self, upload: &ValidatedUpload) -> Result<UploadedAsset, StorageError>;
}
