//! Gas sponsorship relay client.
//!
//! The relay co-signs a transaction kind so the sender pays no gas. It
//! speaks JSON-RPC 2.0 and authenticates with an API key header.
//!
//! Library surface only: neither `aura` nor `gemctl` submits sponsored
//! transactions.

use std::env;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use aura_chain_core::SuiAddress;

/// Default sponsorship endpoint.
pub const DEFAULT_SPONSOR_URL: &str = "https://api.shinami.com/gas/v1";

const SPONSOR_METHOD: &str = "gas_sponsorTransactionBlock";

#[derive(Debug, Error)]
pub enum SponsorError {
    #[error("Sponsorship API key not configured (set SHINAMI_KEY)")]
    MissingApiKey,

    #[error("Sponsorship request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sponsorship relay error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed sponsorship response: {0}")]
    InvalidResponse(String),
}

/// Sponsored transaction returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsoredTransaction {
    pub tx_bytes: String,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

/// Client for the gas sponsorship relay.
#[derive(Debug, Clone)]
pub struct GasSponsor {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GasSponsor {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_SPONSOR_URL.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Read the API key from `SHINAMI_KEY`. A missing key only fails at call time.
    pub fn from_env() -> Self {
        Self::new(env::var("SHINAMI_KEY").ok())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the relay to sponsor `tx_bytes` (base64 transaction kind) for `sender`.
    pub async fn sponsor(
        &self,
        tx_bytes: &str,
        sender: &SuiAddress,
    ) -> Result<SponsoredTransaction, SponsorError> {
        let api_key = self.api_key.as_deref().ok_or(SponsorError::MissingApiKey)?;

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": SPONSOR_METHOD,
            "params": [{ "txBytes": tx_bytes, "sender": sender.as_str() }],
        });

        tracing::debug!("Requesting gas sponsorship for {}", sender);
        let response: RpcResponse = self
            .http
            .post(&self.endpoint)
            .header("X-API-Key", api_key)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(SponsorError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = response
            .result
            .ok_or_else(|| SponsorError::InvalidResponse("missing result".to_string()))?;
        let sponsored: SponsoredTransaction = serde_json::from_value(result)
            .map_err(|e| SponsorError::InvalidResponse(e.to_string()))?;

        tracing::info!("✓ Transaction sponsored for {}", sender);
        Ok(sponsored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, routing::post};

    fn sender() -> SuiAddress {
        SuiAddress::parse(&format!("0x{}", "cd".repeat(32))).unwrap()
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let sponsor = GasSponsor::new(None).with_endpoint("http://127.0.0.1:9");
        assert!(matches!(
            sponsor.sponsor("AAAA", &sender()).await,
            Err(SponsorError::MissingApiKey)
        ));

        assert!(!GasSponsor::new(Some("  ".to_string())).has_api_key());
    }

    #[tokio::test]
    async fn sponsored_bytes_are_returned() {
        let router = Router::new().route(
            "/",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["x-api-key"], "test-key");
                assert_eq!(body["method"], SPONSOR_METHOD);
                assert_eq!(body["params"][0]["txBytes"], "AAAA");
                Json(json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "result": { "txBytes": "BBBB", "signature": "sig" }
                }))
            }),
        );
        let url = serve(router).await;

        let sponsor = GasSponsor::new(Some("test-key".to_string())).with_endpoint(url);
        let sponsored = sponsor.sponsor("AAAA", &sender()).await.unwrap();
        assert_eq!(sponsored.tx_bytes, "BBBB");
        assert_eq!(sponsored.signature.as_deref(), Some("sig"));
    }

    #[tokio::test]
    async fn relay_error_object_is_surfaced() {
        let router = Router::new().route(
            "/",
            post(|| async {
                Json(json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": { "code": -32602, "message": "insufficient fund" }
                }))
            }),
        );
        let url = serve(router).await;

        let sponsor = GasSponsor::new(Some("k".to_string())).with_endpoint(url);
        match sponsor.sponsor("AAAA", &sender()).await {
            Err(SponsorError::Rpc { code, message }) => {
                assert_eq!(code, -32602);
                assert_eq!(message, "insufficient fund");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
