//! Request and response bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of slots in a battle deck.
pub const DECK_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleLogin<'a> {
    pub id_token: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WalletRequest<'a> {
    pub wallet_address: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WalletConfirm<'a> {
    pub wallet_address: &'a str,
    pub signature: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeckUpdate<'a> {
    pub gems: &'a [u64],
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DeckResponse {
    pub deck: Vec<u64>,
}

/// Successful login: bearer token plus whatever profile data the server adds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthToken {
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Challenge returned by `bind-wallet/request`, to be signed by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BindChallenge {
    pub nonce: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemMetadata {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// One entry of the user's gem collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemItem {
    pub id: u64,
    pub quantity: u32,
    pub metadata: GemMetadata,
}
