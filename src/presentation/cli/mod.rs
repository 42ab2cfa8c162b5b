pub mod decor;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::ServerConfig;
use crate::infrastructure::ai::{DEFAULT_MODEL, GenerationConfig, OPENAI_CHAT_COMPLETIONS_URL};
use decor::SuggestCommand;

#[derive(Debug, Parser)]
#[command(author, version, about = "Redecoration suggestions for a room photo", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "DECOR_URL",
        default_value = "http://localhost:3000"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Check that a server is answering
    Ping,

    /// Upload a photo and print redecoration suggestions
    Suggest(SuggestCommand),
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "DECOR_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "DECOR_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    #[arg(long, env = "DECOR_OPENAI_URL", default_value = OPENAI_CHAT_COMPLETIONS_URL)]
    pub openai_url: String,

    #[arg(long, env = "DECOR_OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub openai_model: String,

    /// Decor requests allowed per client IP per minute (0 disables the limit)
    #[arg(long, env = "DECOR_RATE_LIMIT_PER_MINUTE", default_value_t = 30)]
    pub decor_rate_limit: u32,
}

impl ServeCommand {
    pub fn into_server_config(self) -> ServerConfig {
        ServerConfig {
            bind_address: SocketAddr::new(self.host, self.port),
            upload_dir: self.upload_dir,
            openai_api_key: self.openai_api_key.unwrap_or_default(),
            generation: GenerationConfig {
                endpoint_url: self.openai_url,
                model: self.openai_model,
                ..GenerationConfig::default()
            },
            decor_rate_limit_per_minute: self.decor_rate_limit,
        }
    }
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
