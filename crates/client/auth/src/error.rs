//! Error types for the zkLogin flow.

use std::io;

use aura_chain_core::TransportError;
use thiserror::Error;

/// Session persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt record under '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

/// Identity token decoding failures.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token must have three dot-separated segments")]
    Malformed,

    #[error("Token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Token has no subject claim")]
    MissingSubject,
}

/// Errors raised by zkLogin state transitions.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("zkLogin not properly initialized: {0}")]
    NotInitialized(&'static str),

    #[error("Failed to fetch current epoch: {0}")]
    Epoch(#[from] TransportError),

    #[error("Invalid identity token: {0}")]
    Jwt(#[from] JwtError),

    #[error("Failed to generate valid Sui address: {0}")]
    InvalidAddress(String),

    #[error("Session expired: max epoch {max_epoch} is behind current epoch {current_epoch}")]
    SessionExpired { max_epoch: u64, current_epoch: u64 },

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid provider configuration: {0}")]
    Provider(#[from] url::ParseError),
}

/// Failure reported by the external backend during login notification.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

/// Outcome of processing the identity provider's redirect.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("No id_token in callback")]
    NoToken,

    #[error("zkLogin completion failed: {0}")]
    AuthFailed(#[source] AuthError),
}

impl CallbackError {
    /// Short indicator appended to the login page URL (`?error=...`).
    pub fn indicator(&self) -> &'static str {
        match self {
            CallbackError::NoToken => "no_token",
            CallbackError::AuthFailed(_) => "auth_failed",
        }
    }
}
