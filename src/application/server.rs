use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::application::routes::app_router;
use crate::application::state::{AppState, AppStateConfig};
use crate::infrastructure::ai::GenerationConfig;
use crate::infrastructure::storage::LocalAssetStore;

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub upload_dir: PathBuf,
    pub openai_api_key: String,
    pub generation: GenerationConfig,
    pub decor_rate_limit_per_minute: u32,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    // One-time setup: the upload directory exists before any request arrives.
    let store = LocalAssetStore::init(&config.upload_dir)
        .await
        .with_context(|| format!("failed to prepare {}", config.upload_dir.display()))?;

    if config.openai_api_key.trim().is_empty() {
        warn!("OPENAI_API_KEY is not set - decor requests will fail until it is configured");
    }

    let upload_dir = store.dir().display().to_string();
    let model = config.generation.model.clone();

    let state = AppState::from_store(
        store,
        AppStateConfig {
            openai_api_key: config.openai_api_key,
            generation: config.generation,
            decor_rate_limit_per_minute: config.decor_rate_limit_per_minute,
        },
    );

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        upload_dir = %upload_dir,
        model = %model,
        "starting HTTP server"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
