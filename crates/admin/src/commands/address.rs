//! Print the admin signing address.

use anyhow::{Context, Result};
use aura_chain_sui::AdminSigner;
use clap::Parser;

/// Show the address derived from SUI_PRIVATE_KEY
#[derive(Debug, Parser)]
pub struct Address;

impl Address {
    pub fn execute(&self) -> Result<()> {
        let signer = AdminSigner::from_env().context("Failed to load admin signer")?;
        println!("{}", signer.address());
        Ok(())
    }
}
