//! Ephemeral signing key for one zkLogin session.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ed25519_dalek::{SECRET_KEY_LENGTH, SigningKey};
use rand::rngs::OsRng;

/// Ed25519 keypair that lives only as long as its session.
#[derive(Clone)]
pub struct EphemeralKeyPair {
    signing_key: SigningKey,
}

impl EphemeralKeyPair {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Rebuild the keypair from its hex-encoded secret scalar.
    pub fn from_secret_hex(secret: &str) -> Result<Self, String> {
        let bytes = hex::decode(secret).map_err(|e| format!("Invalid secret hex: {}", e))?;
        let secret: [u8; SECRET_KEY_LENGTH] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            format!(
                "Secret key must be {} bytes, got {}",
                SECRET_KEY_LENGTH,
                bytes.len()
            )
        })?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&secret),
        })
    }

    /// Hex-encoded secret scalar, as persisted by the session store.
    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn public_key_base64(&self) -> String {
        STANDARD.encode(self.public_key_bytes())
    }
}

impl PartialEq for EphemeralKeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for EphemeralKeyPair {}

impl fmt::Debug for EphemeralKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralKeyPair")
            .field("public_key", &self.public_key_base64())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_round_trip_preserves_public_key() {
        let key = EphemeralKeyPair::generate();
        let restored = EphemeralKeyPair::from_secret_hex(&key.secret_hex()).unwrap();
        assert_eq!(restored.public_key_bytes(), key.public_key_bytes());
    }

    #[test]
    fn bad_secrets_are_rejected() {
        assert!(EphemeralKeyPair::from_secret_hex("zz").is_err());
        assert!(EphemeralKeyPair::from_secret_hex("abcd").is_err());
    }

    #[test]
    fn debug_hides_secret() {
        let key = EphemeralKeyPair::generate();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains(&key.secret_hex()));
    }
}
