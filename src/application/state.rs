use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::DecorService;
use crate::domain::repositories::AssetStore;
use crate::infrastructure::ai::GenerationConfig;
use crate::infrastructure::storage::LocalAssetStore;

/// Everything that varies between production and test environments.
pub struct AppStateConfig {
    pub openai_api_key: String,
    pub generation: GenerationConfig,
    /// Per-IP budget for `POST /api/decor`; 0 disables rate limiting.
    pub decor_rate_limit_per_minute: u32,
}

#[derive(Clone)]
pub struct AppState {
    pub decor_service: DecorService,
    pub upload_dir: PathBuf,
    pub decor_rate_limit_per_minute: u32,
}

impl AppState {
    /// Build the application state around an already initialised upload store.
    pub fn from_store(store: LocalAssetStore, config: AppStateConfig) -> Self {
        let upload_dir = store.dir().to_path_buf();
        let store: Arc<dyn AssetStore> = Arc::new(store);

        #[allow(clippy::expect_used)]
        let http_client = reqwest::ClientBuilder::new()
            .build()
            .expect("failed to build HTTP client");

        let decor_service = DecorService::new(
            store,
            http_client,
            config.generation,
            config.openai_api_key,
        );

        Self {
            decor_service,
            upload_dir,
            decor_rate_limit_per_minute: config.decor_rate_limit_per_minute,
        }
    }
}
