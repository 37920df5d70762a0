//! zkLogin state machine.
//!
//! ```text
//! Uninitialized ─initialize─▶ Initializing ─▶ Initialized
//!       ▲                          │              │ login_with_provider
//!       │ logout                   ▼              ▼
//! Authenticated ◀── Completing ◀── AwaitingProviderCallback
//!                       │
//!                       ▼
//!                     Error
//! ```
//!
//! Every transition takes `&mut self`, so a flow never has two transitions
//! in flight at once.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

use aura_chain_core::{EpochSource, SuiAddress};

use crate::error::{AuthError, BackendError, CallbackError};
use crate::jwt::{decode_claims, placeholder_address};
use crate::keypair::EphemeralKeyPair;
use crate::nonce::generate_randomness;
use crate::provider::{OAuthProvider, parse_callback};
use crate::session::Session;
use crate::store::{KeyValueStore, SessionStore};

/// Lifecycle state of a [`ZkLoginFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AuthState {
    Uninitialized,
    Initializing,
    Initialized,
    AwaitingProviderCallback,
    Completing,
    Authenticated,
    Error,
}

/// Binding reported to the backend after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkLoginBinding {
    pub sui_address: SuiAddress,
    pub jwt: String,
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Backend notified when a zkLogin completes.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Register the binding and return the backend's bearer token.
    async fn register_zklogin(&self, binding: &ZkLoginBinding) -> Result<String, BackendError>;
}

/// zkLogin flow for one client instance.
pub struct ZkLoginFlow<S> {
    state: AuthState,
    session: Session,
    last_error: Option<String>,
    store: SessionStore<S>,
    provider: OAuthProvider,
    epochs: Arc<dyn EpochSource>,
    backend: Option<Arc<dyn AuthBackend>>,
}

impl<S: KeyValueStore> ZkLoginFlow<S> {
    pub fn new(
        epochs: Arc<dyn EpochSource>,
        store: SessionStore<S>,
        provider: OAuthProvider,
    ) -> Self {
        Self {
            state: AuthState::Uninitialized,
            session: Session::default(),
            last_error: None,
            store,
            provider,
            epochs,
            backend: None,
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn AuthBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn backend_token(&self) -> Option<String> {
        self.store.backend_token()
    }

    /// Load the persisted session and derive the state from it.
    pub fn restore(&mut self) -> AuthState {
        match self.store.load() {
            Some(session) => {
                self.state = if session.is_authenticated() {
                    AuthState::Authenticated
                } else if session.nonce.is_some() {
                    AuthState::Initialized
                } else {
                    AuthState::Uninitialized
                };
                self.session = session;
            }
            None => {
                self.session = Session::default();
                self.state = AuthState::Uninitialized;
            }
        }
        tracing::debug!("Restored zkLogin state: {}", self.state);
        self.state
    }

    /// Create the ephemeral key, randomness and nonce for a new login.
    ///
    /// Keeps an existing unauthenticated session while its nonce is inside
    /// the epoch window; an expired one is replaced.
    pub async fn initialize(&mut self) -> Result<(), AuthError> {
        self.require(
            "initialize",
            &[
                AuthState::Uninitialized,
                AuthState::Initialized,
                AuthState::Error,
            ],
        )?;

        self.state = AuthState::Initializing;

        let current_epoch = match self.epochs.current_epoch().await {
            Ok(epoch) => epoch,
            Err(e) => return Err(self.fail(e.into())),
        };

        if self.session.nonce.is_some() && !self.session.is_authenticated() {
            if self.session.ensure_valid_at(current_epoch).is_ok() {
                tracing::debug!("zkLogin already initialized, keeping nonce");
                self.state = AuthState::Initialized;
                self.last_error = None;
                return Ok(());
            }
            tracing::info!(
                "Pending nonce expired at epoch {}, regenerating",
                self.session.max_epoch.unwrap_or_default()
            );
        }

        match self.start_session(current_epoch) {
            Ok(session) => {
                tracing::info!(
                    "zkLogin initialized (max epoch {})",
                    session.max_epoch.unwrap_or_default()
                );
                self.session = session;
                self.state = AuthState::Initialized;
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn start_session(&self, current_epoch: u64) -> Result<Session, AuthError> {
        let key = EphemeralKeyPair::generate();
        let randomness = generate_randomness();

        let session = Session::start(key, randomness, current_epoch);
        self.store.save(&session)?;
        Ok(session)
    }

    /// Authorization URL the caller should redirect the user to.
    pub async fn login_with_provider(&mut self, state: Option<&str>) -> Result<String, AuthError> {
        self.require(
            "start provider login",
            &[
                AuthState::Uninitialized,
                AuthState::Initialized,
                AuthState::AwaitingProviderCallback,
                AuthState::Error,
            ],
        )?;

        // Re-entering from the callback wait revalidates the pending nonce
        if self.state == AuthState::AwaitingProviderCallback {
            self.state = AuthState::Initialized;
        }
        self.initialize().await?;

        let nonce = self
            .session
            .nonce
            .as_deref()
            .ok_or(AuthError::NotInitialized("failed to generate nonce"))?;

        let url = match self.provider.authorization_url(nonce, state) {
            Ok(url) => url,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.state = AuthState::AwaitingProviderCallback;
        Ok(url)
    }

    /// Finish the login with the provider's identity token.
    pub async fn complete_login(&mut self, jwt: &str) -> Result<SuiAddress, AuthError> {
        self.require(
            "complete login",
            &[
                AuthState::Uninitialized,
                AuthState::Initialized,
                AuthState::AwaitingProviderCallback,
                AuthState::Error,
            ],
        )?;

        if self.session.ephemeral_key.is_none() || self.session.randomness.is_none() {
            return Err(self.fail(AuthError::NotInitialized(
                "missing ephemeral key or randomness",
            )));
        }

        self.state = AuthState::Completing;

        let binding = match Self::bind(jwt) {
            Ok(binding) => binding,
            Err(e) => return Err(self.fail(e)),
        };

        self.notify_backend(&binding).await;

        let mut session = self.session.clone();
        session.jwt_token = Some(binding.jwt);
        session.user_address = Some(binding.sui_address.clone());

        if let Err(e) = self.store.save(&session) {
            return Err(self.fail(e.into()));
        }

        self.session = session;
        self.state = AuthState::Authenticated;
        self.last_error = None;

        tracing::info!("✓ zkLogin complete: {}", binding.sui_address);
        Ok(binding.sui_address)
    }

    fn bind(jwt: &str) -> Result<ZkLoginBinding, AuthError> {
        let claims = decode_claims(jwt)?;
        let address = placeholder_address(&claims.sub);
        let sui_address =
            SuiAddress::parse(&address).map_err(|e| AuthError::InvalidAddress(e.to_string()))?;

        Ok(ZkLoginBinding {
            sui_address,
            jwt: jwt.trim().to_string(),
            sub: claims.sub,
            email: claims.email,
            name: claims.name,
        })
    }

    async fn notify_backend(&self, binding: &ZkLoginBinding) {
        let Some(backend) = &self.backend else {
            return;
        };

        match backend.register_zklogin(binding).await {
            Ok(token) => {
                if let Err(e) = self.store.save_backend_token(&token) {
                    tracing::warn!("Failed to store backend token: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Backend authentication failed, continuing with local auth: {}",
                    e
                );
            }
        }
    }

    /// Process the provider redirect (`#id_token=...`).
    pub async fn handle_callback(&mut self, callback: &str) -> Result<SuiAddress, CallbackError> {
        let token = parse_callback(callback)?;
        self.complete_login(&token)
            .await
            .map_err(CallbackError::AuthFailed)
    }

    /// Reset everything and erase persisted data.
    pub fn logout(&mut self) {
        self.session = Session::default();
        self.state = AuthState::Uninitialized;
        self.last_error = None;

        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear zkLogin state: {}", e);
        }
        tracing::info!("Logged out");
    }

    /// Fail unless the session is authenticated and inside its epoch window.
    pub async fn ensure_usable(&self) -> Result<(), AuthError> {
        if !self.session.is_authenticated() {
            return Err(AuthError::NotInitialized("not authenticated"));
        }
        let current_epoch = self.epochs.current_epoch().await?;
        self.session.ensure_valid_at(current_epoch)
    }

    fn require(&self, action: &'static str, allowed: &[AuthState]) -> Result<(), AuthError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(AuthError::InvalidTransition {
                action,
                state: self.state.into(),
            })
        }
    }

    fn fail(&mut self, error: AuthError) -> AuthError {
        tracing::warn!("zkLogin error: {}", error);
        self.state = AuthState::Error;
        self.last_error = Some(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use aura_chain_core::MockLedger;

    fn flow(ledger: &MockLedger) -> ZkLoginFlow<MemoryStore> {
        ZkLoginFlow::new(
            Arc::new(ledger.clone()),
            SessionStore::new(MemoryStore::new()),
            OAuthProvider::default(),
        )
    }

    #[tokio::test]
    async fn complete_without_initialize_is_a_precondition_error() {
        let ledger = MockLedger::new(3);
        let mut flow = flow(&ledger);

        let err = flow.complete_login("a.b.c").await.unwrap_err();
        assert!(matches!(err, AuthError::NotInitialized(_)));
        assert_eq!(flow.state(), AuthState::Error);
        assert!(flow.last_error().unwrap().contains("not properly initialized"));
    }

    #[tokio::test]
    async fn authenticated_flow_rejects_initialize() {
        let ledger = MockLedger::new(3);
        let mut flow = flow(&ledger);
        flow.initialize().await.unwrap();
        flow.complete_login(&crate::jwt::encode_test_token(&serde_json::json!({ "sub": "42" })))
            .await
            .unwrap();

        let err = flow.initialize().await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot initialize while authenticated");
        assert_eq!(flow.state(), AuthState::Authenticated);
    }

    #[test]
    fn state_names_are_snake_case() {
        assert_eq!(
            AuthState::AwaitingProviderCallback.to_string(),
            "awaiting_provider_callback"
        );
    }
}
