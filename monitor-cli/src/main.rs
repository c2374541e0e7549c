//! capmon: query a message-delivery store from the command line.
//! Config from env and optional CLI args.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use monitor_cli::{execute, init_tracing, Cli, MonitorConfig};
use monitor_storage::MessageRepository;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = MonitorConfig::load(cli.database_url)?;
    init_tracing(config.log_file.as_deref())?;

    if let Some(parent) = Path::new(&config.database_url)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).context("Create database directory")?;
    }

    info!("Opening message store at {}", config.database_url);
    let repo = MessageRepository::new(&config.database_url)
        .await
        .with_context(|| format!("Open message store {}", config.database_url))?;

    let output = execute(cli.command, &repo, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
