use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::StorageError;
use crate::domain::repositories::AssetStore;
use crate::domain::uploads::{
    FILENAME_SALT_BOUND, UploadedAsset, ValidatedUpload, generate_filename,
};

/// Fresh names drawn before giving up on a store call.
const MAX_NAME_ATTEMPTS: u32 = 8;

/// Stores uploads as plain files in a single directory.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    dir: PathBuf,
}

impl LocalAssetStore {
    /// Create the upload directory if needed and resolve it to an absolute path.
    /// Call once at startup, before the server accepts requests.
    pub async fn init(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::write(dir.display(), e))?;
        let dir = fs::canonicalize(&dir)
            .await
            .map_err(|e| StorageError::write(dir.display(), e))?;

        debug!(dir = %dir.display(), "upload directory ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn store(&self, upload: &ValidatedUpload) -> Result<UploadedAsset, StorageError> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = generate_filename(
                Utc::now().timestamp_millis(),
                rand::random_range(0..FILENAME_SALT_BOUND),
                upload.original_filename(),
            );
            let path = self.dir.join(&filename);

            // create_new: an existing asset is never overwritten.
            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    debug!(%filename, "generated filename already taken, retrying");
                    continue;
                }
                Err(err) => return Err(StorageError::write(path.display(), err)),
            };

            let written = async {
                file.write_all(upload.bytes()).await?;
                file.flush().await
            }
            .await;

            if let Err(err) = written {
                drop(file);
                if let Err(remove_err) = fs::remove_file(&path).await {
                    warn!(path = %path.display(), error = %remove_err, "failed to remove partial upload");
                }
                return Err(StorageError::write(path.display(), err));
            }

            debug!(%filename, bytes = upload.byte_size(), "stored upload");
            return Ok(UploadedAsset {
                generated_filename: filename,
                source_media_type: upload.media_type().to_string(),
                byte_size: upload.byte_size(),
                storage_path: path,
            });
        }

        Err(StorageError::NameExhausted {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }
}
