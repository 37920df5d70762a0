//! Epoch source that connects to Sui on first use.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use aura_chain_core::{EpochSource, TransportError};
use aura_chain_sui::{SuiConfig, SuiLedgerClient};

/// Commands that never read the epoch (logout, deck) stay offline.
pub struct LazySuiEpochs {
    config: SuiConfig,
    client: OnceCell<SuiLedgerClient>,
}

impl LazySuiEpochs {
    pub fn new(config: SuiConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }
}

#[async_trait]
impl EpochSource for LazySuiEpochs {
    async fn current_epoch(&self) -> Result<u64, TransportError> {
        let client = self
            .client
            .get_or_try_init(|| SuiLedgerClient::connect(self.config.clone()))
            .await
            .map_err(TransportError::from)?;
        client.current_epoch().await
    }
}
