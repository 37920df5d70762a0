//! Sui blockchain integration for Aurayale.
//!
//! This crate backs the ledger-agnostic traits of `aura-chain-core` with the
//! Sui Rust SDK:
//! - Epoch reads for zkLogin session bounds
//! - Intent → programmable transaction translation, signing and execution
//! - Admin signer loading from a Bech32 secret
//! - Gas sponsorship relay client
//!
//! # Usage
//!
//! ```ignore
//! use aura_chain_sui::{AdminSigner, SuiConfig, SuiLedgerClient};
//! use aura_chain_core::TransactionExecutor;
//!
//! let client = SuiLedgerClient::connect(SuiConfig::from_env()?)
//!     .await?
//!     .with_signer(AdminSigner::from_env()?);
//! let result = client.execute(&intent).await?;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod signer;
pub mod sponsor;
pub mod utils;

pub use client::SuiLedgerClient;
pub use config::{SuiConfig, SuiNetwork};
pub use core::{Result, SuiError};
pub use signer::AdminSigner;
pub use sponsor::{DEFAULT_SPONSOR_URL, GasSponsor, SponsorError, SponsoredTransaction};
