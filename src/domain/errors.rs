use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write upload {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no free filename after {attempts} attempts")]
    NameExhausted { attempts: u32 },
}

impl StorageError {
    pub fn write(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_string(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation credential is not configured")]
    MissingCredential,
    /// Transport, auth, rate-limit, timeout or malformed-response failure.
    /// Carries the upstream diagnostic for logs only.
    #[error("upstream generation failed: {0}")]
    Upstream(String),
}

impl GenerationError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }
}
