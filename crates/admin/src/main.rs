//! Gem contract admin tool.
//!
//! Run with: `gemctl <command>`

mod commands;
mod logging;

use anyhow::{Context, Result};
use aura_admin::AdminConfig;
use clap::Parser;
use commands::{Address, Burn, Merge, MergeBurn, Mint, MintPair};

/// Admin tool for the Aurayale gem contract
#[derive(Parser)]
#[command(name = "gemctl")]
#[command(about = "Mint, merge and burn Aurayale gems", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Mint the red/blue pair and save their IDs
    MintPair(MintPair),

    /// Merge the saved pair and burn the result
    MergeBurn(MergeBurn),

    /// Mint a single gem
    Mint(Mint),

    /// Merge two gems
    Merge(Merge),

    /// Burn a gem
    Burn(Burn),

    /// Print the admin signing address
    Address(Address),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (SUI_PRIVATE_KEY and friends)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging()?;

    let config = AdminConfig::from_env().context("Invalid gemctl configuration")?;

    let result = match cli.command {
        Command::MintPair(cmd) => cmd.execute(&config).await,
        Command::MergeBurn(cmd) => cmd.execute(&config).await,
        Command::Mint(cmd) => cmd.execute(&config).await,
        Command::Merge(cmd) => cmd.execute(&config).await,
        Command::Burn(cmd) => cmd.execute(&config).await,
        Command::Address(cmd) => cmd.execute(),
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}
