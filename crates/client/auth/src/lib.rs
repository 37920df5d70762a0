//! zkLogin authentication for the Aurayale client.
//!
//! # Architecture
//!
//! ```text
//! ZkLoginFlow (state machine)
//!   ├── EpochSource      (aura-chain-core; current epoch for max_epoch)
//!   ├── SessionStore<S>  (KeyValueStore: FileStore | MemoryStore)
//!   ├── OAuthProvider    (authorization URL, callback parsing)
//!   └── AuthBackend      (optional, best-effort login notification)
//! ```
//!
//! Nonce derivation, randomness, ephemeral keys and token decoding are
//! free-standing helpers with no I/O.

pub mod error;
pub mod jwt;
pub mod keypair;
pub mod machine;
pub mod nonce;
pub mod proof;
pub mod provider;
pub mod session;
pub mod store;

pub use error::{AuthError, BackendError, CallbackError, JwtError, StoreError};
pub use jwt::{JwtClaims, decode_claims, placeholder_address};
pub use keypair::EphemeralKeyPair;
pub use machine::{AuthBackend, AuthState, ZkLoginBinding, ZkLoginFlow};
pub use nonce::{derive_nonce, generate_randomness};
pub use proof::{IssBase64Details, ProofPoints, ZkLoginProof};
pub use provider::{OAuthProvider, parse_callback};
pub use session::{MAX_EPOCH_WINDOW, Session};
pub use store::{BACKEND_TOKEN_KEY, FileStore, KeyValueStore, MemoryStore, SESSION_KEY, SessionStore};
