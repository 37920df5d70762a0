//! End-to-end zkLogin flow against a mock ledger.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

use aura_auth::{
    AuthBackend, AuthError, AuthState, BackendError, FileStore, KeyValueStore, MemoryStore,
    OAuthProvider, SESSION_KEY, SessionStore, ZkLoginBinding, ZkLoginFlow, derive_nonce,
};
use aura_chain_core::MockLedger;

const SUB: &str = "110169484474386276334";

fn google_token() -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "iss": "https://accounts.google.com",
            "sub": SUB,
            "email": "player@example.com",
            "name": "Player One"
        })
        .to_string(),
    );
    format!("{}.{}.sig", header, payload)
}

#[derive(Default)]
struct RecordingBackend {
    fail: bool,
    calls: Mutex<Vec<ZkLoginBinding>>,
}

#[async_trait]
impl AuthBackend for RecordingBackend {
    async fn register_zklogin(&self, binding: &ZkLoginBinding) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push(binding.clone());
        if self.fail {
            Err(BackendError("Sui zkLogin failed".to_string()))
        } else {
            Ok("backend-bearer".to_string())
        }
    }
}

fn memory_flow(ledger: &MockLedger, medium: &MemoryStore) -> ZkLoginFlow<MemoryStore> {
    ZkLoginFlow::new(
        Arc::new(ledger.clone()),
        SessionStore::new(medium.clone()),
        OAuthProvider::google("client-id", "http://localhost:3000/auth/callback"),
    )
}

#[tokio::test]
async fn initialize_twice_keeps_nonce() {
    let ledger = MockLedger::new(200);
    let mut flow = memory_flow(&ledger, &MemoryStore::new());

    flow.initialize().await.unwrap();
    let first = flow.session().clone();
    assert_eq!(flow.state(), AuthState::Initialized);
    assert_eq!(first.max_epoch, Some(210));

    let key = first.ephemeral_key.as_ref().unwrap();
    assert_eq!(
        first.nonce.as_deref(),
        Some(derive_nonce(&key.public_key_bytes(), 210, first.randomness.as_deref().unwrap()).as_str())
    );

    ledger.set_epoch(205);
    flow.initialize().await.unwrap();
    assert_eq!(flow.session().nonce, first.nonce);
    assert_eq!(flow.session().max_epoch, Some(210));
}

#[tokio::test]
async fn initialize_replaces_expired_nonce() {
    let ledger = MockLedger::new(100);
    let medium = MemoryStore::new();
    let mut flow = memory_flow(&ledger, &medium);

    flow.initialize().await.unwrap();
    let stale = flow.session().clone();
    assert_eq!(stale.max_epoch, Some(110));

    // Last epoch of the window still reuses the nonce
    ledger.set_epoch(110);
    flow.initialize().await.unwrap();
    assert_eq!(flow.session().nonce, stale.nonce);

    ledger.set_epoch(500);
    flow.initialize().await.unwrap();
    assert_eq!(flow.state(), AuthState::Initialized);
    assert_eq!(flow.session().max_epoch, Some(510));
    assert_ne!(flow.session().nonce, stale.nonce);
    assert_ne!(flow.session().ephemeral_key, stale.ephemeral_key);
    flow.session().ensure_valid_at(500).unwrap();

    // The fresh session is what a restart sees
    let mut restarted = memory_flow(&ledger, &medium);
    restarted.restore();
    assert_eq!(restarted.session().nonce, flow.session().nonce);

    // A pending nonce restored after its window closed is not sent to the provider
    ledger.set_epoch(1000);
    let url = restarted.login_with_provider(None).await.unwrap();
    let fresh = restarted.session().nonce.clone().unwrap();
    assert_ne!(Some(&fresh), flow.session().nonce.as_ref());
    assert_eq!(restarted.session().max_epoch, Some(1010));
    assert!(url.contains(&fresh));
    assert_eq!(restarted.state(), AuthState::AwaitingProviderCallback);
}

#[tokio::test]
async fn epoch_failure_leaves_no_session() {
    let ledger = MockLedger::new(1);
    ledger.fail_epoch(Some("rpc unavailable"));
    let medium = MemoryStore::new();
    let mut flow = memory_flow(&ledger, &medium);

    let err = flow.initialize().await.unwrap_err();
    assert!(matches!(err, AuthError::Epoch(_)));
    assert_eq!(flow.state(), AuthState::Error);
    assert!(flow.last_error().unwrap().contains("rpc unavailable"));
    assert!(flow.session().nonce.is_none());
    assert_eq!(medium.get(SESSION_KEY).unwrap(), None);

    // Recovery from the error state
    ledger.fail_epoch(None);
    flow.initialize().await.unwrap();
    assert_eq!(flow.state(), AuthState::Initialized);
    assert!(flow.last_error().is_none());
}

#[tokio::test]
async fn login_complete_logout() {
    let ledger = MockLedger::new(7);
    let medium = MemoryStore::new();
    let backend = Arc::new(RecordingBackend::default());
    let mut flow = memory_flow(&ledger, &medium).with_backend(backend.clone());

    let url = flow.login_with_provider(Some("deck")).await.unwrap();
    assert_eq!(flow.state(), AuthState::AwaitingProviderCallback);
    let nonce = flow.session().nonce.clone().unwrap();
    assert!(url.contains(&format!("nonce={}", nonce)));
    assert!(url.contains("response_type=id_token"));

    let address = flow.complete_login(&google_token()).await.unwrap();
    assert_eq!(flow.state(), AuthState::Authenticated);
    assert!(flow.is_authenticated());
    assert!(address.as_str().ends_with(SUB));
    assert_eq!(flow.backend_token().as_deref(), Some("backend-bearer"));

    let calls = backend.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].sub, SUB);
    assert_eq!(calls[0].email.as_deref(), Some("player@example.com"));
    assert_eq!(calls[0].sui_address, address);

    flow.logout();
    assert_eq!(flow.state(), AuthState::Uninitialized);
    assert!(!flow.is_authenticated());
    assert!(flow.session().ephemeral_key.is_none());
    assert_eq!(medium.get(SESSION_KEY).unwrap(), None);
    assert!(flow.backend_token().is_none());
}

#[tokio::test]
async fn backend_failure_does_not_block_login() {
    let ledger = MockLedger::new(7);
    let backend = Arc::new(RecordingBackend {
        fail: true,
        ..Default::default()
    });
    let mut flow = memory_flow(&ledger, &MemoryStore::new()).with_backend(backend.clone());

    flow.initialize().await.unwrap();
    flow.complete_login(&google_token()).await.unwrap();

    assert!(flow.is_authenticated());
    assert!(flow.backend_token().is_none());
    assert_eq!(backend.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_token_moves_to_error() {
    let ledger = MockLedger::new(7);
    let mut flow = memory_flow(&ledger, &MemoryStore::new());
    flow.initialize().await.unwrap();

    let err = flow.complete_login("not-a-jwt").await.unwrap_err();
    assert!(matches!(err, AuthError::Jwt(_)));
    assert_eq!(flow.state(), AuthState::Error);
    assert!(!flow.is_authenticated());

    // The session survives, so a retry with a good token succeeds
    flow.complete_login(&google_token()).await.unwrap();
    assert!(flow.is_authenticated());
}

#[tokio::test]
async fn session_is_restored_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = MockLedger::new(50);
    let provider = OAuthProvider::default();

    let mut first = ZkLoginFlow::new(
        Arc::new(ledger.clone()),
        SessionStore::new(FileStore::new(dir.path()).unwrap()),
        provider.clone(),
    );
    first.login_with_provider(None).await.unwrap();
    let nonce = first.session().nonce.clone();

    // The callback lands in a fresh process
    let mut second = ZkLoginFlow::new(
        Arc::new(ledger.clone()),
        SessionStore::new(FileStore::new(dir.path()).unwrap()),
        provider.clone(),
    );
    assert_eq!(second.restore(), AuthState::Initialized);
    assert_eq!(second.session().nonce, nonce);

    let callback = format!("http://localhost:3000/auth/callback#id_token={}", google_token());
    second.handle_callback(&callback).await.unwrap();

    let mut third = ZkLoginFlow::new(
        Arc::new(ledger),
        SessionStore::new(FileStore::new(dir.path()).unwrap()),
        provider,
    );
    assert_eq!(third.restore(), AuthState::Authenticated);
    assert_eq!(
        third.session().ephemeral_key.as_ref().map(|k| k.public_key_bytes()),
        second.session().ephemeral_key.as_ref().map(|k| k.public_key_bytes())
    );
}

#[tokio::test]
async fn callback_errors_carry_indicators() {
    let ledger = MockLedger::new(1);
    let mut flow = memory_flow(&ledger, &MemoryStore::new());

    let err = flow.handle_callback("#error=access_denied").await.unwrap_err();
    assert_eq!(err.indicator(), "no_token");

    // No session to complete
    let err = flow
        .handle_callback(&format!("#id_token={}", google_token()))
        .await
        .unwrap_err();
    assert_eq!(err.indicator(), "auth_failed");
}

#[tokio::test]
async fn expired_sessions_are_unusable() {
    let ledger = MockLedger::new(100);
    let mut flow = memory_flow(&ledger, &MemoryStore::new());

    assert!(flow.ensure_usable().await.is_err());

    flow.initialize().await.unwrap();
    flow.complete_login(&google_token()).await.unwrap();
    flow.ensure_usable().await.unwrap();

    ledger.set_epoch(111);
    assert!(matches!(
        flow.ensure_usable().await,
        Err(AuthError::SessionExpired {
            max_epoch: 110,
            current_epoch: 111
        })
    ));
}
