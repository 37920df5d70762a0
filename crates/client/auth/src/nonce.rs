//! Nonce derivation and randomness generation.
//!
//! The nonce binds the OAuth identity token to one ephemeral key and one
//! epoch window. It is a pure function of its inputs.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

const NONCE_DOMAIN: &[u8] = b"aurayale/zklogin-nonce/v1";

/// Nonce width in bytes before encoding (27 base64url characters).
pub const NONCE_BYTES: usize = 20;

/// Derive the OAuth nonce for `(public_key, max_epoch, randomness)`.
///
/// Each input is length-prefixed so no two distinct triples share an
/// encoding.
pub fn derive_nonce(public_key: &[u8], max_epoch: u64, randomness: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(NONCE_DOMAIN);
    let epoch = max_epoch.to_be_bytes();
    let parts: [&[u8]; 3] = [public_key, &epoch, randomness.as_bytes()];
    for part in parts {
        hasher.update((part.len() as u32).to_be_bytes());
        hasher.update(part);
    }
    let digest = hasher.finalize();
    URL_SAFE_NO_PAD.encode(&digest[..NONCE_BYTES])
}

/// Fresh 128-bit randomness rendered as a decimal string.
pub fn generate_randomness() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    u128::from_be_bytes(bytes).to_string()
}
