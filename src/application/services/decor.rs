use std::sync::Arc;

use tracing::{info, warn};

use crate::application::errors::AppError;
use crate::domain::prompts::{DecorationRequest, GenerationPrompt};
use crate::domain::repositories::AssetStore;
use crate::domain::suggestions::Suggestions;
use crate::domain::uploads::{PUBLIC_UPLOADS_PATH, UploadCandidate, UploadedAsset};
use crate::infrastructure::ai::{self, GenerationConfig};

/// Outcome of one successful decor request.
#[derive(Debug, Clone)]
pub struct Decoration {
    pub asset: UploadedAsset,
    pub image_url: String,
    pub suggestions: Suggestions,
}

/// Runs the decor pipeline: validate, store, prompt, generate, extract.
#[derive(Clone)]
pub struct DecorService {
    store: Arc<dyn AssetStore>,
    http_client: reqwest::Client,
    generation: Arc<GenerationConfig>,
    api_key: Arc<str>,
}

impl DecorService {
    pub fn new(
        store: Arc<dyn AssetStore>,
        http_client: reqwest::Client,
        generation: GenerationConfig,
        api_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            http_client,
            generation: Arc::new(generation),
            api_key: api_key.into(),
        }
    }

    /// `public_base_url` is the scheme and authority the photo will be served
    /// back from, e.g. `http://example.com`.
    pub async fn decorate(
        &self,
        candidate: UploadCandidate,
        style: Option<String>,
        public_base_url: &str,
    ) -> Result<Decoration, AppError> {
        let upload = candidate.validate()?;
        let asset = self.store.store(&upload).await?;
        info!(
            filename = %asset.generated_filename,
            media_type = %asset.source_media_type,
            bytes = asset.byte_size,
            "stored decor photo"
        );

        let request = DecorationRequest::new(style, asset);
        let image_url = public_image_url(public_base_url, &request.image.generated_filename);
        let prompt = GenerationPrompt::build(&request.style, &image_url);

        let result = ai::generate(&self.http_client, &self.generation, &self.api_key, &prompt)
            .await?;

        let suggestions = Suggestions::extract(&result.raw_text);
        if suggestions.is_structured() {
            info!(count = suggestions.len(), style = %request.style, "extracted suggestions");
        } else {
            warn!(
                count = suggestions.len(),
                raw_len = result.raw_text.len(),
                "model output was not structured, fell back to line extraction"
            );
        }

        Ok(Decoration {
            asset: request.image,
            image_url,
            suggestions,
        })
    }
}

pub fn public_image_url(public_base_url: &str, filename: &str) -> String {
    format!(
        "{}{PUBLIC_UPLOADS_PATH}/{filename}",
        public_base_url.trim_end_matches('/')
    )
}
