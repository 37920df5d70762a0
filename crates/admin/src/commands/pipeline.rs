//! Two-phase pipeline commands.

use std::path::PathBuf;

use anyhow::Result;
use aura_admin::{AdminConfig, FIRST_GEM, SECOND_GEM};
use clap::Parser;

use super::connect;

/// Mint the red and blue gems and save their IDs
#[derive(Debug, Parser)]
pub struct MintPair {
    /// Artifact file (default: GEMCTL_ARTIFACT or nft-objects.json)
    #[arg(short, long)]
    pub artifact: Option<PathBuf>,
}

impl MintPair {
    pub async fn execute(&self, config: &AdminConfig) -> Result<()> {
        let path = self.artifact.as_ref().unwrap_or(&config.artifact_path);
        let pipeline = connect(config).await?;

        tracing::info!(
            "Minting {} '{}' and {} '{}'",
            FIRST_GEM.0,
            FIRST_GEM.1,
            SECOND_GEM.0,
            SECOND_GEM.1
        );
        let artifact = pipeline.mint_pair(path).await?;

        println!("Red gem:  {} (tx {})", artifact.red_gem_id, artifact.red_gem_tx_hash);
        println!("Blue gem: {} (tx {})", artifact.blue_gem_id, artifact.blue_gem_tx_hash);
        println!("Saved to {}", path.display());
        Ok(())
    }
}

/// Merge the saved gems, then burn the merged gem
#[derive(Debug, Parser)]
pub struct MergeBurn {
    /// Artifact file written by mint-pair
    #[arg(short, long)]
    pub artifact: Option<PathBuf>,
}

impl MergeBurn {
    pub async fn execute(&self, config: &AdminConfig) -> Result<()> {
        let path = self.artifact.as_ref().unwrap_or(&config.artifact_path);
        let pipeline = connect(config).await?;

        let report = pipeline.merge_and_burn(path).await?;

        println!("Merged gem: {}", report.merged_id);
        println!("Merge tx:   {}", report.merge_digest);
        println!("Burn tx:    {}", report.burn_digest);
        Ok(())
    }
}
