use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::responses::ErrorResponse;
use crate::domain::uploads::UploadRejection;
use crate::domain::{GenerationError, StorageError};

pub const NO_FILE_MESSAGE: &str = "Aucune image reçue.";
pub const UNSUPPORTED_MEDIA_TYPE_MESSAGE: &str = "Seules les images sont acceptées.";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Image trop volumineuse (6 Mo maximum).";
pub const MISSING_CREDENTIAL_MESSAGE: &str = "OPENAI_API_KEY introuvable côté serveur.";
pub const GENERATION_FAILED_MESSAGE: &str = "Erreur serveur lors de la génération IA.";
pub const RATE_LIMITED_MESSAGE: &str = "Trop de requêtes, réessayez plus tard.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no image received")]
    NoFileProvided,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Rejected(#[from] UploadRejection),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoFileProvided | Self::Validation(_) | Self::Rejected(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Storage(_) | Self::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller. Upstream and storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::NoFileProvided => NO_FILE_MESSAGE.to_string(),
            Self::Validation(message) => message.clone(),
            Self::Rejected(UploadRejection::UnsupportedMediaType { .. }) => {
                UNSUPPORTED_MEDIA_TYPE_MESSAGE.to_string()
            }
            Self::Rejected(UploadRejection::PayloadTooLarge { .. }) => {
                PAYLOAD_TOO_LARGE_MESSAGE.to_string()
            }
            Self::Generation(GenerationError::MissingCredential) => {
                MISSING_CREDENTIAL_MESSAGE.to_string()
            }
            Self::Storage(_) | Self::Generation(GenerationError::Upstream(_)) => {
                GENERATION_FAILED_MESSAGE.to_string()
            }
        }
    }
}

/// Response-side wrapper: logs the full error and renders `{error}`.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            error!(error = %self.0, detail = ?self.0, "decor request failed");
        } else {
            warn!(error = %self.0, "decor request rejected");
        }

        (status, Json(ErrorResponse::new(self.0.public_message()))).into_response()
    }
}
