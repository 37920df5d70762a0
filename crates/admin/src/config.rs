//! Admin tool configuration.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use aura_chain_core::GemContract;

use crate::artifact::DEFAULT_ARTIFACT;
use crate::error::ConfigError;

/// Default pause between dependent on-chain mutations.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(1_000);

#[derive(Clone, Debug)]
pub struct AdminConfig {
    pub contract: GemContract,
    pub artifact_path: PathBuf,
    pub settle: Duration,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            contract: GemContract::default(),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT),
            settle: DEFAULT_SETTLE,
        }
    }
}

impl AdminConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AURA_PACKAGE_ID`, `AURA_ADMIN_CAP_ID`, `AURA_REGISTRY_ID` - Contract object IDs
    /// - `GEMCTL_ARTIFACT` - Mint artifact path (default: nft-objects.json)
    /// - `GEMCTL_SETTLE_MS` - Settle delay in milliseconds (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self {
            contract: GemContract::from_env()?,
            ..Self::default()
        };

        if let Ok(path) = env::var("GEMCTL_ARTIFACT") {
            config.artifact_path = PathBuf::from(path);
        }

        if let Some(millis) = read_env::<u64>("GEMCTL_SETTLE_MS")? {
            config.settle = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

fn read_env<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, env::var(key).ok().as_deref())
}

/// Blank values count as unset; anything else must parse.
fn parse_value<T>(key: &'static str, raw: Option<&str>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    raw.parse().map(Some).map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_value_must_be_a_number() {
        assert_eq!(parse_value::<u64>("GEMCTL_SETTLE_MS", None).unwrap(), None);
        assert_eq!(parse_value::<u64>("GEMCTL_SETTLE_MS", Some("  ")).unwrap(), None);
        assert_eq!(
            parse_value::<u64>("GEMCTL_SETTLE_MS", Some(" 250 ")).unwrap(),
            Some(250)
        );

        let err = parse_value::<u64>("GEMCTL_SETTLE_MS", Some("1s")).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidValue { key: "GEMCTL_SETTLE_MS", value, .. } if value == "1s"
        ));
        assert!(err.to_string().starts_with("Invalid GEMCTL_SETTLE_MS '1s'"));
    }

    #[test]
    fn defaults_match_the_scripts() {
        let config = AdminConfig::default();
        assert_eq!(config.settle, DEFAULT_SETTLE);
        assert_eq!(config.artifact_path, PathBuf::from("nft-objects.json"));
    }
}
