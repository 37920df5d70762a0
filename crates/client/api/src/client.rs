//! Game server REST client.

use std::env;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use aura_auth::{AuthBackend, BackendError, ZkLoginBinding};

use crate::error::ApiError;
use crate::types::{
    Ack, AuthToken, BindChallenge, Credentials, DECK_SIZE, DeckResponse, DeckUpdate, GemItem,
    GoogleLogin, WalletConfirm, WalletRequest,
};

const WALLET_HEX_LEN: usize = 40;

/// Default game server API root.
pub const DEFAULT_API_URL: &str = "https://aura-server.zeabur.app/api";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the Aurayale game server.
///
/// Authenticated endpoints send the stored bearer token; calling them
/// without one fails locally with [`ApiError::MissingToken`].
#[derive(Debug, Clone)]
pub struct AuraApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AuraApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Client for `AURA_API_URL` (or the public server).
    pub fn from_env() -> Self {
        Self::new(env::var("AURA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(server_error(status, &body, fallback));
        }

        tracing::debug!("API response ({}): {}", status, String::from_utf8_lossy(&body));
        Ok(serde_json::from_slice(&body)?)
    }

    // ------------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------------

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthToken, ApiError> {
        let request = self
            .request(Method::POST, "/login")
            .json(&Credentials { username, password });
        self.send(request, "Login failed").await
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Ack, ApiError> {
        let request = self
            .request(Method::POST, "/register")
            .json(&Credentials { username, password });
        self.send(request, "Register failed").await
    }

    pub async fn google_login(&self, id_token: &str) -> Result<AuthToken, ApiError> {
        let request = self
            .request(Method::POST, "/google-login")
            .json(&GoogleLogin { id_token });
        self.send(request, "Google login failed").await
    }

    /// Register a zkLogin binding and obtain a bearer token.
    pub async fn sui_zklogin(&self, binding: &ZkLoginBinding) -> Result<AuthToken, ApiError> {
        let request = self.request(Method::POST, "/sui-zklogin").json(binding);
        self.send(request, "Sui zkLogin failed").await
    }

    // ------------------------------------------------------------------------
    // Wallet binding
    // ------------------------------------------------------------------------

    pub async fn request_bind_wallet(
        &self,
        wallet_address: &str,
    ) -> Result<BindChallenge, ApiError> {
        validate_wallet(wallet_address)?;
        let request = self
            .authorized(Method::POST, "/bind-wallet/request")?
            .json(&WalletRequest { wallet_address });
        self.send(request, "Request bind wallet failed").await
    }

    pub async fn confirm_bind_wallet(
        &self,
        wallet_address: &str,
        signature: &str,
    ) -> Result<Ack, ApiError> {
        validate_wallet(wallet_address)?;
        let request = self
            .authorized(Method::POST, "/bind-wallet/confirm")?
            .json(&WalletConfirm {
                wallet_address,
                signature,
            });
        self.send(request, "Confirm bind wallet failed").await
    }

    pub async fn unbind_wallet(&self, wallet_address: &str) -> Result<Ack, ApiError> {
        validate_wallet(wallet_address)?;
        let request = self
            .authorized(Method::POST, "/unbind-wallet")?
            .json(&WalletRequest { wallet_address });
        self.send(request, "Unbind wallet failed").await
    }

    // ------------------------------------------------------------------------
    // Gems and deck
    // ------------------------------------------------------------------------

    pub async fn user_gems(&self) -> Result<Vec<GemItem>, ApiError> {
        let request = self.authorized(Method::GET, "/user/gems")?;
        self.send(request, "Failed to get gems").await
    }

    pub async fn user_deck(&self) -> Result<Vec<u64>, ApiError> {
        let request = self.authorized(Method::GET, "/user/gem-deck")?;
        let response: DeckResponse = self.send(request, "Failed to get gem deck").await?;
        Ok(response.deck)
    }

    /// Replace the deck. Exactly [`DECK_SIZE`] gem IDs are required.
    pub async fn edit_deck(&self, gems: &[u64]) -> Result<Vec<u64>, ApiError> {
        if gems.len() != DECK_SIZE {
            return Err(ApiError::InvalidDeckSize {
                expected: DECK_SIZE,
                actual: gems.len(),
            });
        }
        let request = self
            .authorized(Method::POST, "/user/gem-deck")?
            .json(&DeckUpdate { gems });
        let response: DeckResponse = self.send(request, "Failed to update gem deck").await?;
        tracing::info!("Deck updated: {:?}", response.deck);
        Ok(response.deck)
    }
}

/// Bound wallets are EVM accounts: `0x` + 40 hex digits, either case.
pub fn is_wallet_address(wallet_address: &str) -> bool {
    wallet_address
        .strip_prefix("0x")
        .is_some_and(|hex| {
            hex.len() == WALLET_HEX_LEN && hex.chars().all(|c| c.is_ascii_hexdigit())
        })
}

fn validate_wallet(wallet_address: &str) -> Result<(), ApiError> {
    if is_wallet_address(wallet_address) {
        Ok(())
    } else {
        Err(ApiError::InvalidAddress(wallet_address.to_string()))
    }
}

fn server_error(status: StatusCode, body: &[u8], fallback: &str) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Server {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl AuthBackend for AuraApiClient {
    async fn register_zklogin(&self, binding: &ZkLoginBinding) -> Result<String, BackendError> {
        self.sui_zklogin(binding)
            .await
            .map(|auth| auth.token)
            .map_err(|e| BackendError(e.user_message()))
    }
}
