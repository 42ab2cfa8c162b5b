use axum::Json;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use tracing::{debug, warn};

use crate::application::errors::{ApiError, AppError};
use crate::application::routes::support::public_base_url;
use crate::application::state::AppState;
use crate::domain::responses::DecorResponse;
use crate::domain::uploads::{
    MAX_UPLOAD_BYTES, UploadCandidate, UploadRejection, check_media_type, check_size,
};

const PHOTO_FIELD: &str = "photo";
const STYLE_FIELD: &str = "style";
const SINGLE_PHOTO_MESSAGE: &str = "Une seule image est acceptée.";
const INVALID_FORM_MESSAGE: &str = "Formulaire multipart invalide.";

#[derive(Debug, Default)]
struct DecorForm {
    photo: Option<UploadCandidate>,
    style: Option<String>,
}

/// `POST /api/decor`: multipart `photo` (image, at most 6 MiB) and optional `style`.
#[tracing::instrument(skip(state, headers, multipart))]
pub(crate) async fn decorate(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DecorResponse>, ApiError> {
    // A body that is not multipart at all carries no photo either.
    let mut multipart = multipart.map_err(|rejection| {
        debug!(%rejection, "request body is not multipart");
        AppError::NoFileProvided
    })?;

    let form = read_decor_form(&mut multipart).await?;
    let photo = form.photo.ok_or(AppError::NoFileProvided)?;

    let decoration = state
        .decor_service
        .decorate(photo, form.style, &public_base_url(&headers))
        .await?;

    Ok(Json(DecorResponse {
        suggestions: decoration.suggestions.into_vec(),
        image_url: decoration.image_url,
    }))
}

async fn read_decor_form(multipart: &mut Multipart) -> Result<DecorForm, AppError> {
    let mut form = DecorForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            // Only file parts count as a photo; a plain text `photo` value is ignored.
            PHOTO_FIELD if field.file_name().is_some_and(|name| !name.is_empty()) => {
                if form.photo.is_some() {
                    return Err(AppError::validation(SINGLE_PHOTO_MESSAGE));
                }
                form.photo = Some(read_photo(field).await?);
            }
            STYLE_FIELD => {
                form.style = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Read the photo part, checking the declared media type before any byte is
/// read and stopping as soon as the size ceiling is crossed.
async fn read_photo(mut field: Field<'_>) -> Result<UploadCandidate, AppError> {
    let media_type = field.content_type().unwrap_or_default().to_string();
    check_media_type(&media_type)?;

    let original_filename = field.file_name().map(str::to_string);
    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if let Err(rejection) = check_size(bytes.len() + chunk.len()) {
            warn!(
                received = bytes.len() + chunk.len(),
                limit = MAX_UPLOAD_BYTES,
                "photo exceeds size limit"
            );
            return Err(rejection.into());
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(UploadCandidate {
        original_filename,
        media_type,
        bytes,
    })
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return UploadRejection::PayloadTooLarge {
            limit: MAX_UPLOAD_BYTES,
        }
        .into();
    }

    warn!(error = %err.body_text(), "failed to read multipart body");
    AppError::validation(INVALID_FORM_MESSAGE)
}
