//! Single-step contract calls.

use anyhow::Result;
use aura_admin::AdminConfig;
use aura_chain_core::GemType;
use clap::Parser;

use super::connect;

/// Mint one gem to the admin address
#[derive(Debug, Parser)]
pub struct Mint {
    /// Gem type (green, red, blue, yellow)
    #[arg(value_parser = parse_gem_type)]
    pub gem_type: GemType,

    /// Gem name, e.g. gem_red_Brilliant
    pub name: String,
}

impl Mint {
    pub async fn execute(&self, config: &AdminConfig) -> Result<()> {
        let gem = connect(config).await?.mint(self.gem_type, &self.name).await?;
        println!("{} (tx {})", gem.object_id, gem.digest);
        Ok(())
    }
}

/// Merge two gems into a new one
#[derive(Debug, Parser)]
pub struct Merge {
    /// Gem that survives the merge
    pub main: String,

    /// Gem consumed by the merge
    pub burn: String,
}

impl Merge {
    pub async fn execute(&self, config: &AdminConfig) -> Result<()> {
        let merged = connect(config).await?.merge(&self.main, &self.burn).await?;
        println!("{} (tx {})", merged.object_id, merged.digest);
        Ok(())
    }
}

/// Destroy a gem
#[derive(Debug, Parser)]
pub struct Burn {
    /// Gem object ID
    pub object_id: String,
}

impl Burn {
    pub async fn execute(&self, config: &AdminConfig) -> Result<()> {
        let digest = connect(config).await?.burn(&self.object_id).await?;
        println!("tx {}", digest);
        Ok(())
    }
}

fn parse_gem_type(value: &str) -> Result<GemType, String> {
    GemType::parse(value).map_err(|e| e.to_string())
}
