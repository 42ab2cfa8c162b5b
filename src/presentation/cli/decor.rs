use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::print_json;
use crate::infrastructure::client::DecorClient;

#[derive(Debug, Args)]
pub struct SuggestCommand {
    /// Photo of the room (any image format the server accepts)
    #[arg(long)]
    pub photo: PathBuf,
    /// Wanted decoration style (server default: moderne)
    #[arg(long)]
    pub style: Option<String>,
}

pub async fn suggest(client: &DecorClient, command: SuggestCommand) -> Result<()> {
    let response = client
        .decorate(&command.photo, command.style.as_deref())
        .await?;
    print_json(&response)
}

pub async fn ping(client: &DecorClient) -> Result<()> {
    let body = client.ping().await?;
    print_json(&body)
}
