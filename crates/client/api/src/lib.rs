//! Game server REST API client.
//!
//! JSON bodies, bearer tokens on authenticated endpoints, and the server's
//! `error` field as the failure message. [`AuraApiClient`] also serves as
//! the zkLogin [`aura_auth::AuthBackend`].

pub mod client;
pub mod error;
pub mod types;

pub use client::{AuraApiClient, DEFAULT_API_URL, is_wallet_address};
pub use error::ApiError;
pub use types::{Ack, AuthToken, BindChallenge, DECK_SIZE, GemItem, GemMetadata};
