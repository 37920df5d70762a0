//! OAuth identity provider configuration and callback parsing.

use std::env;

use url::Url;

use crate::error::CallbackError;

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

pub const DEFAULT_GOOGLE_CLIENT_ID: &str =
    "326148801733-i5skacoksa3b6cia2f5l8akp3kg1ua7b.apps.googleusercontent.com";

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/auth/callback";

const RESPONSE_TYPE: &str = "id_token";
const SCOPE: &str = "openid email profile";

/// Implicit-flow OAuth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProvider {
    pub authorize_url: String,
    pub client_id: String,
    pub redirect_uri: String,
}

impl OAuthProvider {
    pub fn google(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            authorize_url: GOOGLE_AUTHORIZE_URL.to_string(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Google provider configured from `GOOGLE_CLIENT_ID` and `ZKLOGIN_REDIRECT_URI`.
    pub fn from_env() -> Self {
        Self::google(
            env::var("GOOGLE_CLIENT_ID").unwrap_or_else(|_| DEFAULT_GOOGLE_CLIENT_ID.to_string()),
            env::var("ZKLOGIN_REDIRECT_URI").unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
        )
    }

    /// Authorization URL embedding `nonce` (and `state`, when given).
    pub fn authorization_url(
        &self,
        nonce: &str,
        state: Option<&str>,
    ) -> Result<String, url::ParseError> {
        let mut url = Url::parse(&self.authorize_url)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri)
                .append_pair("response_type", RESPONSE_TYPE)
                .append_pair("scope", SCOPE)
                .append_pair("nonce", nonce);
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url.into())
    }
}

impl Default for OAuthProvider {
    fn default() -> Self {
        Self::google(DEFAULT_GOOGLE_CLIENT_ID, DEFAULT_REDIRECT_URI)
    }
}

/// Extract `id_token` from a redirect URL, fragment or query string.
///
/// Accepts a full callback URL (token in fragment or query), or just the
/// `#...` / `?...` part.
pub fn parse_callback(input: &str) -> Result<String, CallbackError> {
    let input = input.trim();

    let mut candidates: Vec<&str> = Vec::new();
    if let Ok(url) = Url::parse(input) {
        if let Some(fragment) = url.fragment() {
            candidates.push(fragment);
        }
        if let Some(query) = url.query() {
            candidates.push(query);
        }
        return find_token(&candidates);
    }

    let params = input.trim_start_matches(['#', '?']);
    candidates.push(params);
    find_token(&candidates)
}

fn find_token(candidates: &[&str]) -> Result<String, CallbackError> {
    candidates
        .iter()
        .copied()
        .flat_map(|params| url::form_urlencoded::parse(params.as_bytes()))
        .find(|(key, value)| key == "id_token" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .ok_or(CallbackError::NoToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_url_carries_flow_parameters() {
        let provider = OAuthProvider::google("client-123", "https://game.example/auth/callback");
        let url = provider.authorization_url("n0nce", Some("deck")).unwrap();
        let parsed = Url::parse(&url).unwrap();

        assert_eq!(parsed.host_str(), Some("accounts.google.com"));
        assert_eq!(parsed.path(), "/o/oauth2/v2/auth");

        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("client_id"), Some("client-123"));
        assert_eq!(get("redirect_uri"), Some("https://game.example/auth/callback"));
        assert_eq!(get("response_type"), Some("id_token"));
        assert_eq!(get("scope"), Some("openid email profile"));
        assert_eq!(get("nonce"), Some("n0nce"));
        assert_eq!(get("state"), Some("deck"));
    }

    #[test]
    fn state_is_optional() {
        let url = OAuthProvider::default().authorization_url("n", None).unwrap();
        assert!(!url.contains("state="));
    }

    #[test]
    fn token_is_found_in_fragment_or_query() {
        let from_fragment =
            parse_callback("http://localhost:3000/auth/callback#state=x&id_token=aaa.bbb.ccc")
                .unwrap();
        assert_eq!(from_fragment, "aaa.bbb.ccc");

        let from_query = parse_callback("http://localhost:3000/auth/callback?id_token=q.q.q").unwrap();
        assert_eq!(from_query, "q.q.q");

        assert_eq!(parse_callback("#id_token=f.f.f").unwrap(), "f.f.f");
        assert_eq!(parse_callback("id_token=bare.b.b&x=1").unwrap(), "bare.b.b");
    }

    #[test]
    fn missing_token_is_no_token() {
        let err = parse_callback("http://localhost:3000/auth/callback#error=access_denied")
            .unwrap_err();
        assert_eq!(err.indicator(), "no_token");
        assert!(matches!(parse_callback("#id_token="), Err(CallbackError::NoToken)));
    }
}
