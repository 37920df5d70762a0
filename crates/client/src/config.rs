//! Client configuration.
use std::env;
use std::path::PathBuf;

use aura_api::DEFAULT_API_URL;
use aura_auth::OAuthProvider;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding the session store files.
    pub state_dir: PathBuf,
    pub api_url: String,
    pub provider: OAuthProvider,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            api_url: DEFAULT_API_URL.to_string(),
            provider: OAuthProvider::default(),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AURA_STATE_DIR` - Session store directory (default: platform data dir)
    /// - `AURA_API_URL` - Game server API root
    /// - `GOOGLE_CLIENT_ID`, `ZKLOGIN_REDIRECT_URI` - OAuth provider settings
    pub fn from_env() -> Self {
        let mut config = Self {
            provider: OAuthProvider::from_env(),
            ..Self::default()
        };

        if let Ok(dir) = env::var("AURA_STATE_DIR") {
            config.state_dir = PathBuf::from(dir);
        }
        if let Ok(url) = env::var("AURA_API_URL") {
            config.api_url = url;
        }

        config
    }
}

fn default_state_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "aurayale")
        .map(|dirs| dirs.data_dir().join("session"))
        .unwrap_or_else(|| PathBuf::from(".aurayale"))
}
