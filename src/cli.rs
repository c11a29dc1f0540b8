/// CLI Module
///
/// Command-line interface configuration using clap.
use clap::{Parser, Subcommand};

use crate::config::{Chain, ConfigOverrides};
use crate::route::{CompositeId, Route};

/// Substrate Block Explorer
///
/// Browse events, blocks, extrinsics, calls and accounts from a chain indexing API
#[derive(Parser, Debug)]
#[command(name = "scan-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Indexer API endpoint (overrides SCAN_API_URL env var)
    #[arg(short = 'a', long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Chain preset for token decimals and symbol (overrides SCAN_CHAIN env var)
    #[arg(short = 'c', long, value_enum, global = true)]
    pub chain: Option<Chain>,

    /// Token decimals (overrides the chain preset)
    #[arg(long, value_name = "DECIMALS", global = true)]
    pub decimals: Option<u8>,

    /// Token symbol (overrides the chain preset)
    #[arg(long, value_name = "SYMBOL", global = true)]
    pub symbol: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List events, newest first
    Events {
        /// 1-based page number
        #[arg(short = 'p', long, default_value = "1")]
        page: u32,
    },
    /// Show a block by height
    Block { height: u64 },
    /// Show an event by `<height>-<eventIndex>`
    Event { id: CompositeId },
    /// Show an extrinsic by `<height>-<extrinsicIndex>`
    Extrinsic { id: CompositeId },
    /// Show a call by `<height>-<callIndex>`
    Call { id: CompositeId },
    /// Show an account by address
    Account { address: String },
    /// Open an explorer location such as `/events?page=2` or `/block/100`
    Open { location: String },
    /// Read locations from stdin, one per line, and render each
    Browse,
}

impl Cli {
    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Command::Events { page: 0 } = self.command {
            anyhow::bail!("Page must be greater than 0");
        }

        if self.timeout == Some(0) {
            anyhow::bail!("Timeout must be greater than 0");
        }

        Ok(())
    }

    /// Values given on the command line, to be layered over the environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            chain: self.chain,
            decimals: self.decimals,
            symbol: self.symbol.clone(),
            timeout_secs: self.timeout,
        }
    }
}

impl Command {
    /// The explorer location this command opens, `None` for interactive browsing
    pub fn location(&self) -> Option<String> {
        let route = match self {
            Command::Events { page } => Route::Events { page: *page },
            Command::Block { height } => Route::Block(*height),
            Command::Event { id } => Route::Event(*id),
            Command::Extrinsic { id } => Route::Extrinsic(*id),
            Command::Call { id } => Route::Call(*id),
            Command::Account { address } => Route::Account(address.clone()),
            Command::Open { location } => return Some(location.clone()),
            Command::Browse => return None,
        };
        Some(route.to_string())
    }
}
