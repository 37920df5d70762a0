//! `gemctl` subcommands.

mod address;
mod pipeline;
mod single;

pub use address::Address;
pub use pipeline::{MergeBurn, MintPair};
pub use single::{Burn, Merge, Mint};

use anyhow::{Context, Result};
use aura_admin::{AdminConfig, GemPipeline};
use aura_chain_core::SigningContext;
use aura_chain_sui::utils::conversion::from_sdk_address;
use aura_chain_sui::{AdminSigner, SuiConfig, SuiLedgerClient};

/// Connect to Sui with the admin signer and wrap the client in a pipeline.
pub(crate) async fn connect(config: &AdminConfig) -> Result<GemPipeline<SuiLedgerClient>> {
    let signer = AdminSigner::from_env().context("Failed to load admin signer")?;
    let address = from_sdk_address(&signer.address())?;
    tracing::info!("Signing address: {}", address);

    let sui_config = SuiConfig::from_env().context("Invalid Sui configuration")?;
    let client = SuiLedgerClient::connect(sui_config)
        .await
        .context("Failed to connect to Sui")?
        .with_signer(signer);

    Ok(GemPipeline::new(
        client,
        config.contract.clone(),
        SigningContext::new(address),
        config.settle,
    ))
}
