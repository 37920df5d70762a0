//! Error types for transaction construction and ledger access.

use crate::types::TxDigest;

/// Malformed identifier supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("invalid object ID: {0}")]
    InvalidObjectId(String),

    #[error("invalid Sui address: {0}")]
    InvalidAddress(String),
}

/// Rejected transaction intent. Raised before construction completes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid {field}: {source}")]
    InvalidIdentifier {
        field: &'static str,
        #[source]
        source: IdentifierError,
    },

    #[error("gem name must not be empty")]
    EmptyGemName,

    #[error("cannot merge object {0} into itself")]
    SelfMerge(String),

    #[error("unknown gem type: {0} (expected green, red, blue or yellow)")]
    UnknownGemType(String),
}

/// Failures talking to the ledger node.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Transaction failed on-chain: {error} (tx: {digest})")]
    ExecutionFailed { digest: TxDigest, error: String },

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}
