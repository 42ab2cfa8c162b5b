use anyhow::Result;
use clap::Parser;
use decor::application::serve;
use decor::infrastructure::client::DecorClient;
use decor::presentation::cli::{Cli, Commands, decor as decor_cli};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => serve(cmd.into_server_config()).await,
        Commands::Ping => {
            let client = DecorClient::from_base_url(&cli.api_url)?;
            decor_cli::ping(&client).await
        }
        Commands::Suggest(cmd) => {
            let client = DecorClient::from_base_url(&cli.api_url)?;
            decor_cli::suggest(&client, cmd).await
        }
    }
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
