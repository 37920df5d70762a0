//! Local identity token decoding.
//!
//! Decoding here is a convenience only: the signature is not verified, and
//! nothing decoded locally should be trusted for authorization decisions.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use aura_chain_core::address::HEX_LEN;

use crate::error::JwtError;

/// Claims read from the identity token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub exp: Option<u64>,
}

/// Decode the payload segment of `token` without verifying it.
pub fn decode_claims(token: &str) -> Result<JwtClaims, JwtError> {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(JwtError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: JwtClaims = serde_json::from_slice(&bytes)?;

    if claims.sub.is_empty() {
        return Err(JwtError::MissingSubject);
    }
    Ok(claims)
}

/// Stand-in address derived from the token subject.
///
/// Keeps the hex characters of `sub`, left-pads to 64 digits and truncates.
/// This is not a zkLogin address: the real derivation needs a proof over
/// the verified token and the user salt.
pub fn placeholder_address(sub: &str) -> String {
    let hex: String = sub.chars().filter(char::is_ascii_hexdigit).collect();
    let padded = format!("{:0>width$}", hex, width = HEX_LEN);
    format!("0x{}", &padded[..HEX_LEN])
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_chain_core::is_valid_address;
    use serde_json::json;

    #[test]
    fn claims_are_decoded_without_verification() {
        let token = encode_test_token(&json!({
            "sub": "110169484474386276334",
            "email": "player@example.com",
            "name": "Player One",
            "iss": "https://accounts.google.com"
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "110169484474386276334");
        assert_eq!(claims.email.as_deref(), Some("player@example.com"));
        assert_eq!(claims.name.as_deref(), Some("Player One"));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(matches!(decode_claims("abc"), Err(JwtError::Malformed)));
        assert!(matches!(decode_claims("a..c"), Err(JwtError::Malformed)));
        assert!(matches!(decode_claims("a.b.c.d"), Err(JwtError::Malformed)));
        assert!(matches!(decode_claims("a.!!!.c"), Err(JwtError::Encoding(_))));

        let no_sub = encode_test_token(&json!({ "email": "x@example.com" }));
        assert!(matches!(decode_claims(&no_sub), Err(JwtError::MissingSubject)));
    }

    #[test]
    fn placeholder_address_is_well_formed() {
        let address = placeholder_address("110169484474386276334");
        assert!(is_valid_address(&address));
        assert!(address.ends_with("110169484474386276334"));

        // Non-hex characters are dropped, overlong subjects truncated
        assert_eq!(placeholder_address("xyz-1"), format!("0x{:0>64}", "1"));
        let long = "f".repeat(80);
        assert_eq!(placeholder_address(&long), format!("0x{}", "f".repeat(64)));
    }
}
