mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vitrina_core::app::AppBuilder;
use vitrina_core::impls::{JsonFileListingStore, StaticCredentials};
use vitrina_core::ports::SystemClock;

use crate::config::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the JSON output.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = JsonFileListingStore::open(&cli.data_file)
        .await
        .with_context(|| format!("failed to open {}", cli.data_file.display()))?;

    let app = AppBuilder::new()
        .store(store)
        .clock(SystemClock)
        .authenticator(StaticCredentials::new(
            cli.credentials.credential_user.clone(),
            cli.credentials.credential_password.clone(),
        ))
        .build()?;

    let output = commands::run(&app, &cli.login, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
