//! Sui network selection and RPC settings.

use std::env;

use crate::core::error::{Result, SuiError};

/// Sui network types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiNetwork {
    /// Sui mainnet
    Mainnet,
    /// Sui testnet
    Testnet,
    /// Sui devnet
    Devnet,
    /// Local Sui network
    Local,
}

impl SuiNetwork {
    pub fn default_rpc_url(&self) -> &str {
        match self {
            SuiNetwork::Mainnet => "https://fullnode.mainnet.sui.io:443",
            SuiNetwork::Testnet => "https://fullnode.testnet.sui.io:443",
            SuiNetwork::Devnet => "https://fullnode.devnet.sui.io:443",
            SuiNetwork::Local => "http://127.0.0.1:9000",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuiNetwork::Mainnet => "mainnet",
            SuiNetwork::Testnet => "testnet",
            SuiNetwork::Devnet => "devnet",
            SuiNetwork::Local => "local",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "mainnet" => Ok(SuiNetwork::Mainnet),
            "testnet" => Ok(SuiNetwork::Testnet),
            "devnet" => Ok(SuiNetwork::Devnet),
            "local" | "localnet" => Ok(SuiNetwork::Local),
            other => Err(SuiError::InvalidConfig(format!(
                "Invalid SUI_NETWORK: {}. Must be mainnet, testnet, devnet, or local",
                other
            ))),
        }
    }
}

/// Sui-specific configuration.
#[derive(Debug, Clone)]
pub struct SuiConfig {
    /// Sui network to connect to
    pub network: SuiNetwork,

    /// Custom RPC endpoint URL (overrides network default)
    pub rpc_url: Option<String>,

    /// Gas budget for transactions (in MIST)
    pub gas_budget: u64,
}

impl SuiConfig {
    /// Create a new Sui configuration.
    pub fn new(network: SuiNetwork) -> Self {
        Self {
            network,
            rpc_url: None,
            gas_budget: 100_000_000, // 0.1 SUI
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SUI_NETWORK` - Network name (mainnet, testnet, devnet, local) (default: mainnet)
    /// - `SUI_RPC_URL` - Custom RPC endpoint URL
    /// - `SUI_GAS_BUDGET` - Gas budget in MIST (default: 100000000)
    pub fn from_env() -> Result<Self> {
        let network =
            SuiNetwork::parse(&env::var("SUI_NETWORK").unwrap_or_else(|_| "mainnet".to_string()))?;

        let rpc_url = env::var("SUI_RPC_URL").ok();

        let gas_budget = env::var("SUI_GAS_BUDGET")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(100_000_000);

        let config = Self {
            network,
            rpc_url,
            gas_budget,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set custom RPC URL.
    pub fn with_rpc_url(mut self, url: String) -> Self {
        self.rpc_url = Some(url);
        self
    }

    /// Set gas budget.
    pub fn with_gas_budget(mut self, budget: u64) -> Self {
        self.gas_budget = budget;
        self
    }

    /// Get the RPC URL (custom or default for network).
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.rpc_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SuiError::InvalidConfig(format!(
                "Invalid RPC URL format: {}",
                url
            )));
        }

        if self.gas_budget == 0 {
            return Err(SuiError::InvalidConfig(
                "Gas budget must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for SuiConfig {
    fn default() -> Self {
        Self::new(SuiNetwork::Mainnet)
    }
}
