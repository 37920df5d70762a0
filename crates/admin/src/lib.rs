//! Operator tooling for the Aurayale gem contract.
//!
//! [`GemPipeline`] drives mint, merge and burn against any
//! [`aura_chain_core::TransactionExecutor`]; the `gemctl` binary wires it
//! to the Sui backend.

pub mod artifact;
pub mod config;
pub mod error;
pub mod pipeline;

pub use artifact::{DEFAULT_ARTIFACT, MintArtifact};
pub use config::AdminConfig;
pub use error::{ArtifactError, ConfigError, PipelineError};
pub use pipeline::{CreatedObject, FIRST_GEM, GemPipeline, MergeBurnReport, SECOND_GEM};
