use anyhow::Context;
use clap::Parser;
use sitesearch::Config;
use sitesearch::cli::Cli;
use sitesearch::commands::{execute, open_adapter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean on stdout
    sitesearch::tracing::init(cli.verbose);

    let config = Config::load(cli.config.as_deref()).await?;
    let documents = cli
        .documents
        .clone()
        .or_else(|| config.documents.clone())
        .context("No document file given: pass --documents or set `documents` in the configuration")?;

    let adapter = open_adapter(&documents, &config, !cli.no_cache)
        .await
        .inspect_err(|e| tracing::error!("Failed to load documents: {:#}", e))?;

    let output = execute(cli.command, &adapter, &config).await?;
    print!("{}", output);

    Ok(())
}
