//! Error types for Sui blockchain operations.

use aura_chain_core::{TransportError, TxDigest};
use thiserror::Error;

/// Errors that can occur during Sui blockchain operations.
#[derive(Debug, Error)]
pub enum SuiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Transaction {digest} aborted: {error}")]
    ExecutionFailed { digest: String, error: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Signer not configured: set SUI_PRIVATE_KEY to sign transactions")]
    MissingSigner,

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SuiError>;

impl From<SuiError> for TransportError {
    fn from(err: SuiError) -> Self {
        match err {
            SuiError::Network(msg) => TransportError::NetworkError(msg),
            SuiError::InvalidConfig(msg) => TransportError::ConfigError(msg),
            SuiError::MissingSigner | SuiError::InvalidKey(_) => {
                TransportError::SigningError(err.to_string())
            }
            SuiError::ExecutionFailed { digest, error } => TransportError::ExecutionFailed {
                digest: TxDigest::new(digest),
                error,
            },
            SuiError::TransactionFailed(msg) => TransportError::InvalidResponse(msg),
            SuiError::ObjectNotFound(id) => {
                TransportError::InvalidResponse(format!("Object not found: {}", id))
            }
            SuiError::Other(e) => TransportError::NetworkError(format!("{:#}", e)),
        }
    }
}
