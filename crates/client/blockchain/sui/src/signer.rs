//! Admin signer loading.

use std::env;

use sui_types::base_types::SuiAddress;
use sui_types::crypto::SuiKeyPair;

use crate::core::error::{Result, SuiError};

/// Keypair plus the address it controls.
pub struct AdminSigner {
    keypair: SuiKeyPair,
    address: SuiAddress,
}

impl AdminSigner {
    /// Decode a Bech32 `suiprivkey1...` secret.
    pub fn from_bech32(secret: &str) -> Result<Self> {
        let keypair = SuiKeyPair::decode(secret.trim())
            .map_err(|e| SuiError::InvalidKey(e.to_string()))?;
        let address = SuiAddress::from(&keypair.public());
        Ok(Self { keypair, address })
    }

    /// Load the signer from `SUI_PRIVATE_KEY`.
    pub fn from_env() -> Result<Self> {
        let secret = env::var("SUI_PRIVATE_KEY").map_err(|_| SuiError::MissingSigner)?;
        if secret.trim().is_empty() {
            return Err(SuiError::MissingSigner);
        }
        Self::from_bech32(&secret)
    }

    pub fn address(&self) -> SuiAddress {
        self.address
    }

    pub fn keypair(&self) -> &SuiKeyPair {
        &self.keypair
    }
}

impl std::fmt::Debug for AdminSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
