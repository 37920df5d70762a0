//! zkLogin session model.

use serde::{Deserialize, Serialize};

use aura_chain_core::SuiAddress;

use crate::error::AuthError;
use crate::keypair::EphemeralKeyPair;
use crate::nonce::derive_nonce;

/// Epochs a fresh session stays valid for.
pub const MAX_EPOCH_WINDOW: u64 = 10;

/// One authentication attempt and, once completed, its result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub ephemeral_key: Option<EphemeralKeyPair>,
    pub randomness: Option<String>,
    pub nonce: Option<String>,
    pub max_epoch: Option<u64>,
    pub jwt_token: Option<String>,
    pub user_address: Option<SuiAddress>,
}

impl Session {
    /// Start a session bound to `current_epoch + MAX_EPOCH_WINDOW`.
    pub fn start(ephemeral_key: EphemeralKeyPair, randomness: String, current_epoch: u64) -> Self {
        let max_epoch = current_epoch.saturating_add(MAX_EPOCH_WINDOW);
        let nonce = derive_nonce(&ephemeral_key.public_key_bytes(), max_epoch, &randomness);
        Self {
            ephemeral_key: Some(ephemeral_key),
            randomness: Some(randomness),
            nonce: Some(nonce),
            max_epoch: Some(max_epoch),
            jwt_token: None,
            user_address: None,
        }
    }

    /// True iff both the identity token and the derived address are present.
    pub fn is_authenticated(&self) -> bool {
        self.jwt_token.is_some() && self.user_address.is_some()
    }

    /// Reject use of the session once its epoch window has elapsed.
    pub fn ensure_valid_at(&self, current_epoch: u64) -> Result<(), AuthError> {
        let max_epoch = self
            .max_epoch
            .ok_or(AuthError::NotInitialized("no epoch bound"))?;
        if current_epoch > max_epoch {
            return Err(AuthError::SessionExpired {
                max_epoch,
                current_epoch,
            });
        }
        Ok(())
    }

    pub(crate) fn to_record(&self) -> Option<SessionRecord> {
        let key = self.ephemeral_key.as_ref()?;
        Some(SessionRecord {
            ephemeral_private_key: key.secret_hex(),
            randomness: self.randomness.clone(),
            nonce: self.nonce.clone(),
            max_epoch: self.max_epoch,
            jwt_token: self.jwt_token.clone(),
            user_address: self.user_address.clone(),
        })
    }

    pub(crate) fn from_record(record: SessionRecord) -> Result<Self, String> {
        let key = EphemeralKeyPair::from_secret_hex(&record.ephemeral_private_key)?;
        Ok(Self {
            ephemeral_key: Some(key),
            randomness: record.randomness,
            nonce: record.nonce,
            max_epoch: record.max_epoch,
            jwt_token: record.jwt_token,
            user_address: record.user_address,
        })
    }
}

/// Persisted form: the key object is replaced by its raw secret scalar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionRecord {
    pub ephemeral_private_key: String,
    #[serde(default)]
    pub randomness: Option<String>,
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub max_epoch: Option<u64>,
    #[serde(default)]
    pub jwt_token: Option<String>,
    #[serde(default)]
    pub user_address: Option<SuiAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_derives_nonce_from_inputs() {
        let key = EphemeralKeyPair::generate();
        let session = Session::start(key.clone(), "42".to_string(), 100);

        assert_eq!(session.max_epoch, Some(110));
        assert_eq!(
            session.nonce.as_deref(),
            Some(derive_nonce(&key.public_key_bytes(), 110, "42").as_str())
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn authentication_requires_token_and_address() {
        let mut session = Session::start(EphemeralKeyPair::generate(), "1".to_string(), 0);
        session.jwt_token = Some("a.b.c".to_string());
        assert!(!session.is_authenticated());

        session.user_address = Some(SuiAddress::parse(&format!("0x{:0>64}", "1")).unwrap());
        assert!(session.is_authenticated());
    }

    #[test]
    fn epoch_window_is_enforced() {
        let session = Session::start(EphemeralKeyPair::generate(), "1".to_string(), 100);
        assert!(session.ensure_valid_at(100).is_ok());
        assert!(session.ensure_valid_at(110).is_ok());
        assert!(matches!(
            session.ensure_valid_at(111),
            Err(AuthError::SessionExpired {
                max_epoch: 110,
                current_epoch: 111
            })
        ));

        assert!(matches!(
            Session::default().ensure_valid_at(0),
            Err(AuthError::NotInitialized(_))
        ));
    }
}
