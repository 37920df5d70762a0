//! Mint artifact file shared between the mint and merge steps.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// Default artifact file name, relative to the working directory.
pub const DEFAULT_ARTIFACT: &str = "nft-objects.json";

/// IDs and digests of the two gems minted by `mint-pair`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintArtifact {
    #[serde(default)]
    pub red_gem_id: String,
    #[serde(default)]
    pub blue_gem_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub red_gem_tx_hash: String,
    #[serde(default)]
    pub blue_gem_tx_hash: String,
}

impl MintArtifact {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let json = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write as pretty JSON via a temp file and atomic rename.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let json = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        let io_err = |source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        };

        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;

        tracing::debug!("Saved mint artifact to {}", path.display());
        Ok(())
    }

    /// Both gem IDs, rejecting empty ones.
    pub fn gem_ids(&self) -> Result<(&str, &str), ArtifactError> {
        let red = self.red_gem_id.trim();
        let blue = self.blue_gem_id.trim();
        if red.is_empty() {
            return Err(ArtifactError::MissingId("redGemId"));
        }
        if blue.is_empty() {
            return Err(ArtifactError::MissingId("blueGemId"));
        }
        Ok((red, blue))
    }
}
