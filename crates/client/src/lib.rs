//! Aurayale user client.
//!
//! # Architecture
//!
//! ```text
//! Client (composition root)
//!   ├─→ ZkLoginFlow<FileStore> (session lifecycle, epoch source injected)
//!   └─→ AuraApiClient          (game server; also the zkLogin backend)
//! ```

pub mod config;
pub mod epochs;

pub use config::ClientConfig;

use std::sync::Arc;

use anyhow::{Context, Result};
use aura_api::{Ack, AuraApiClient, AuthToken, BindChallenge, GemItem};
use aura_auth::{AuthState, CallbackError, FileStore, SessionStore, ZkLoginFlow};
use aura_chain_core::{EpochSource, SuiAddress};

/// Snapshot of the local session for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: AuthState,
    pub address: Option<SuiAddress>,
    pub max_epoch: Option<u64>,
    pub has_backend_token: bool,
}

/// Top-level client container.
pub struct Client {
    flow: ZkLoginFlow<FileStore>,
    api: AuraApiClient,
}

impl Client {
    /// Assemble the client and restore any persisted session.
    pub fn new(config: &ClientConfig, epochs: Arc<dyn EpochSource>) -> Result<Self> {
        let store = FileStore::new(&config.state_dir).with_context(|| {
            format!("Failed to open state directory {}", config.state_dir.display())
        })?;

        let api = AuraApiClient::new(config.api_url.clone());
        let mut flow = ZkLoginFlow::new(epochs, SessionStore::new(store), config.provider.clone())
            .with_backend(Arc::new(api.clone()));
        let state = flow.restore();
        tracing::debug!("Client ready (session {})", state);

        let mut client = Self { flow, api };
        client.refresh_token();
        Ok(client)
    }

    fn refresh_token(&mut self) {
        self.api.set_token(self.flow.backend_token());
    }

    pub fn flow(&self) -> &ZkLoginFlow<FileStore> {
        &self.flow
    }

    /// Start the provider login and return the URL to open.
    ///
    /// `None` when the session is already authenticated.
    pub async fn login(&mut self) -> Result<Option<String>> {
        if self.flow.is_authenticated() {
            return Ok(None);
        }
        let url = self.flow.login_with_provider(None).await?;
        Ok(Some(url))
    }

    /// Complete the login from the provider redirect.
    pub async fn callback(&mut self, redirect: &str) -> Result<SuiAddress, CallbackError> {
        let address = self.flow.handle_callback(redirect).await?;
        self.refresh_token();
        Ok(address)
    }

    pub fn status(&self) -> SessionStatus {
        let session = self.flow.session();
        SessionStatus {
            state: self.flow.state(),
            address: session.user_address.clone(),
            max_epoch: session.max_epoch,
            has_backend_token: self.api.token().is_some(),
        }
    }

    /// Check the session against the current epoch.
    pub async fn check_validity(&self) -> Result<()> {
        Ok(self.flow.ensure_usable().await?)
    }

    pub fn logout(&mut self) {
        self.flow.logout();
        self.api.set_token(None);
    }

    // ------------------------------------------------------------------------
    // Game server accounts
    // ------------------------------------------------------------------------

    /// Password login; the bearer token is persisted like a zkLogin one.
    pub async fn password_login(&mut self, username: &str, password: &str) -> Result<AuthToken> {
        let auth = self.api.login(username, password).await?;
        self.adopt_token(&auth.token)?;
        tracing::info!("Logged in to the game server as {}", username);
        Ok(auth)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Ack> {
        Ok(self.api.register(username, password).await?)
    }

    /// Exchange a Google identity token for a game server session.
    pub async fn google_login(&mut self, id_token: &str) -> Result<AuthToken> {
        let auth = self.api.google_login(id_token).await?;
        self.adopt_token(&auth.token)?;
        Ok(auth)
    }

    fn adopt_token(&mut self, token: &str) -> Result<()> {
        self.flow
            .store()
            .save_backend_token(token)
            .context("Failed to store game server token")?;
        self.api.set_token(Some(token.to_string()));
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Wallet binding
    // ------------------------------------------------------------------------

    /// Challenge the wallet must sign before `confirm_wallet`.
    pub async fn request_wallet(&self, wallet_address: &str) -> Result<BindChallenge> {
        Ok(self.api.request_bind_wallet(wallet_address).await?)
    }

    pub async fn confirm_wallet(&self, wallet_address: &str, signature: &str) -> Result<Ack> {
        Ok(self.api.confirm_bind_wallet(wallet_address, signature).await?)
    }

    pub async fn unbind_wallet(&self, wallet_address: &str) -> Result<Ack> {
        Ok(self.api.unbind_wallet(wallet_address).await?)
    }

    // ------------------------------------------------------------------------
    // Gems and deck
    // ------------------------------------------------------------------------

    pub async fn deck(&self) -> Result<Vec<u64>> {
        Ok(self.api.user_deck().await?)
    }

    pub async fn set_deck(&self, gems: &[u64]) -> Result<Vec<u64>> {
        Ok(self.api.edit_deck(gems).await?)
    }

    pub async fn gems(&self) -> Result<Vec<GemItem>> {
        Ok(self.api.user_gems().await?)
    }
}
