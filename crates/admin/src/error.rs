//! Admin pipeline errors.

use std::io;
use std::path::PathBuf;

use aura_chain_core::{BuildError, TransportError, TxDigest};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Artifact has no {0}")]
    MissingId(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Contract(#[from] BuildError),

    #[error("Invalid {key} '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("{step} failed: {source}")]
    Transport {
        step: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("{step} ({digest}) reported no created object")]
    NoCreatedObject { step: &'static str, digest: TxDigest },

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
