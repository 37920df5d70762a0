//! REST client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the server's `error` field or a fallback.
    #[error("{message} (HTTP {status})")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not logged in to the game server")]
    MissingToken,

    #[error("Deck must contain exactly {expected} gems, got {actual}")]
    InvalidDeckSize { expected: usize, actual: usize },

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),
}

impl ApiError {
    /// Message suitable for showing inline to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
