/// Substrate Block Explorer
///
/// Fetches explorer pages from a chain indexing API and prints them.
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use scan_explorer::api::HttpIndexer;
use scan_explorer::browser::{Browser, OutputMode};
use scan_explorer::cli::Cli;
use scan_explorer::config::{ConfigOverrides, ExplorerConfig};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Logs go to stderr so rendered pages on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.validate()?;

    let env_overrides = ConfigOverrides::from_env().context("Invalid SCAN_* environment variable")?;
    let config = ExplorerConfig::from_overrides(env_overrides.merge(cli.overrides()))
        .context("Invalid explorer configuration")?;

    let indexer = HttpIndexer::new(&config).context("Failed to create indexer client")?;
    tracing::info!("Using indexer at {} ({})", indexer.base_url(), config.chain.symbol);

    let output = if cli.json { OutputMode::Json } else { OutputMode::Table };
    let mut browser = Browser::new(Arc::new(indexer), config.chain.clone(), output);

    match cli.command.location() {
        Some(location) => {
            let page = browser.open(&location).await?;
            println!("{}", page);
        }
        None => {
            eprintln!("🔍 Enter explorer locations (e.g. /events?page=2, /block/100), `quit` to exit");
            let stdin = BufReader::new(tokio::io::stdin());
            browser.browse(stdin, &mut std::io::stdout()).await.context("Browse session failed")?;
        }
    }

    Ok(())
}
