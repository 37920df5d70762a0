//! Transaction builders for the `aurayale` gem contract.
//!
//! ## Move Contract Reference
//!
//! ```move
//! module aurayale::aurayale {
//!     public fun admin_mint(cap: &AdminCap, registry: &mut Registry,
//!                           gem_type: String, name: String, ctx: &mut TxContext): Gem;
//!     public fun merge_v1(cap: &AdminCap, r: &Random,
//!                         main: Gem, burn: Gem, ctx: &mut TxContext): Gem;
//!     public fun admin_burn(cap: &AdminCap, registry: &mut Registry, gem: Gem);
//! }
//! ```
//!
//! All builders are pure: they validate their input and return a
//! [`TransactionIntent`] without touching the network.

use std::env;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::address::HEX_LEN;
use crate::error::BuildError;
use crate::intent::{CallArg, MoveTarget, TransactionIntent, TransferResult};
use crate::types::{ObjectId, ObjectRef, SuiAddress};

/// Deployed package on mainnet.
pub const DEFAULT_PACKAGE_ID: &str =
    "0x9500c58df467016bbb8600c9fe9ba837023bed8d9f3f469eac34462fbf68bd40";
/// Admin capability object held by the operator.
pub const DEFAULT_ADMIN_CAP_ID: &str =
    "0xc68357273072960b8ad84f5db3e0c8a58a3d6ef8351c164bcd995cffdfd7bbfd";
/// Gem registry shared by mint and burn.
pub const DEFAULT_REGISTRY_ID: &str =
    "0x34096d33f1e3a32cd14174ebbe940eafbc44faa702f04dd5f0d20d5768ce1ada";
/// System randomness object consumed by `merge_v1`.
pub const RANDOM_OBJECT_ID: &str = "0x8";
pub const RANDOM_INITIAL_SHARED_VERSION: u64 = 326_168_368;

pub const MODULE: &str = "aurayale";
pub const MINT_FUNCTION: &str = "admin_mint";
pub const MERGE_FUNCTION: &str = "merge_v1";
pub const BURN_FUNCTION: &str = "admin_burn";

/// Gem colours accepted by `admin_mint`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GemType {
    Green,
    Red,
    Blue,
    Yellow,
}

impl GemType {
    pub fn parse(value: &str) -> Result<Self, BuildError> {
        value
            .parse()
            .map_err(|_| BuildError::UnknownGemType(value.to_string()))
    }
}

/// Signing identity for admin calls.
///
/// Constructed explicitly by the caller and passed into every build; the
/// sender of each intent is taken from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    pub address: SuiAddress,
}

impl SigningContext {
    pub fn new(address: SuiAddress) -> Self {
        Self { address }
    }
}

/// Contract metadata and transaction builders.
///
/// Holds only object IDs; signing and execution are injected elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemContract {
    pub package_id: ObjectId,
    pub admin_cap: ObjectId,
    pub registry: ObjectId,
    pub random: ObjectRef,
}

impl Default for GemContract {
    fn default() -> Self {
        Self {
            package_id: known_id(DEFAULT_PACKAGE_ID),
            admin_cap: known_id(DEFAULT_ADMIN_CAP_ID),
            registry: known_id(DEFAULT_REGISTRY_ID),
            random: ObjectRef::shared(
                known_id(RANDOM_OBJECT_ID),
                RANDOM_INITIAL_SHARED_VERSION,
                false,
            ),
        }
    }
}

impl GemContract {
    pub fn new(package_id: ObjectId, admin_cap: ObjectId, registry: ObjectId) -> Self {
        Self {
            package_id,
            admin_cap,
            registry,
            ..Self::default()
        }
    }

    /// Load contract IDs from the environment, falling back to mainnet defaults.
    ///
    /// Environment variables:
    /// - `AURA_PACKAGE_ID` - Deployed package ID
    /// - `AURA_ADMIN_CAP_ID` - Admin capability object ID
    /// - `AURA_REGISTRY_ID` - Gem registry object ID
    pub fn from_env() -> Result<Self, BuildError> {
        let mut contract = Self::default();

        if let Ok(id) = env::var("AURA_PACKAGE_ID") {
            contract.package_id = parse_field("AURA_PACKAGE_ID", &id)?;
        }
        if let Ok(id) = env::var("AURA_ADMIN_CAP_ID") {
            contract.admin_cap = parse_field("AURA_ADMIN_CAP_ID", &id)?;
        }
        if let Ok(id) = env::var("AURA_REGISTRY_ID") {
            contract.registry = parse_field("AURA_REGISTRY_ID", &id)?;
        }

        Ok(contract)
    }

    fn target(&self, function: &str) -> MoveTarget {
        MoveTarget {
            package: self.package_id.clone(),
            module: MODULE.to_string(),
            function: function.to_string(),
        }
    }

    /// Build an `admin_mint` call that transfers the new gem to the signer.
    pub fn build_mint(
        &self,
        ctx: &SigningContext,
        gem_type: GemType,
        gem_name: &str,
    ) -> Result<TransactionIntent, BuildError> {
        let gem_name = gem_name.trim();
        if gem_name.is_empty() {
            return Err(BuildError::EmptyGemName);
        }

        tracing::debug!("Building mint: type={}, name={}", gem_type, gem_name);

        Ok(TransactionIntent {
            target: self.target(MINT_FUNCTION),
            arguments: vec![
                CallArg::Object(ObjectRef::owned(self.admin_cap.clone())),
                CallArg::Object(ObjectRef::owned(self.registry.clone())),
                CallArg::PureString(gem_type.to_string()),
                CallArg::PureString(gem_name.to_string()),
            ],
            sender: ctx.address.clone(),
            transfer: Some(TransferResult {
                recipient: ctx.address.clone(),
            }),
        })
    }

    /// Build a `merge_v1` call combining `main` and `burn` into a new gem.
    pub fn build_merge(
        &self,
        ctx: &SigningContext,
        main_object_id: &str,
        burn_object_id: &str,
    ) -> Result<TransactionIntent, BuildError> {
        let main = parse_field("main object ID", main_object_id)?;
        let burn = parse_field("burn object ID", burn_object_id)?;
        if main == burn {
            return Err(BuildError::SelfMerge(main.to_string()));
        }

        tracing::debug!("Building merge: main={}, burn={}", main, burn);

        Ok(TransactionIntent {
            target: self.target(MERGE_FUNCTION),
            arguments: vec![
                CallArg::Object(ObjectRef::owned(self.admin_cap.clone())),
                CallArg::Object(self.random.clone()),
                CallArg::Object(ObjectRef::owned(main)),
                CallArg::Object(ObjectRef::owned(burn)),
            ],
            sender: ctx.address.clone(),
            transfer: Some(TransferResult {
                recipient: ctx.address.clone(),
            }),
        })
    }

    /// Build an `admin_burn` call. The gem is destroyed, so nothing is transferred.
    pub fn build_burn(
        &self,
        ctx: &SigningContext,
        object_id: &str,
    ) -> Result<TransactionIntent, BuildError> {
        let gem = parse_field("object ID", object_id)?;

        tracing::debug!("Building burn: object={}", gem);

        Ok(TransactionIntent {
            target: self.target(BURN_FUNCTION),
            arguments: vec![
                CallArg::Object(ObjectRef::owned(self.admin_cap.clone())),
                CallArg::Object(ObjectRef::owned(self.registry.clone())),
                CallArg::Object(ObjectRef::owned(gem)),
            ],
            sender: ctx.address.clone(),
            transfer: None,
        })
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<ObjectId, BuildError> {
    ObjectId::parse(value).map_err(|source| BuildError::InvalidIdentifier { field, source })
}

/// Contract IDs compiled into the crate; validated by `default_ids_are_canonical`.
fn known_id(id: &str) -> ObjectId {
    ObjectId::from_canonical(format!("0x{:0>width$}", &id[2..], width = HEX_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdentifierError;
    use crate::types::SharedObject;
    use strum::IntoEnumIterator;

    const SIGNER: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
    const GEM_A: &str = "0xb256e472eab52a7ef377310d76351b44fb7c1f7a2fe16a3a3889be45e9187d8a";
    const GEM_B: &str = "0x3f3807099ee24706fadd7b765061567bd39726fa48108573315a8881d49f8075";

    fn ctx() -> SigningContext {
        SigningContext::new(SuiAddress::parse(SIGNER).unwrap())
    }

    #[test]
    fn mint_targets_admin_mint_with_caller_primitives() {
        let contract = GemContract::default();
        let intent = contract
            .build_mint(&ctx(), GemType::Red, "gem_red_Brilliant")
            .unwrap();

        assert_eq!(
            intent.target.to_string(),
            format!("{}::aurayale::admin_mint", DEFAULT_PACKAGE_ID)
        );
        assert_eq!(intent.arguments.len(), 4);
        assert_eq!(
            intent.arguments[0].as_object().unwrap().id.as_str(),
            DEFAULT_ADMIN_CAP_ID
        );
        assert_eq!(
            intent.arguments[1].as_object().unwrap().id.as_str(),
            DEFAULT_REGISTRY_ID
        );
        assert_eq!(intent.arguments[2].as_str(), Some("red"));
        assert_eq!(intent.arguments[3].as_str(), Some("gem_red_Brilliant"));
        assert_eq!(intent.sender.as_str(), SIGNER);
        assert_eq!(intent.transfer.unwrap().recipient.as_str(), SIGNER);
    }

    #[test]
    fn merge_passes_random_object_as_immutable_shared() {
        let intent = GemContract::default()
            .build_merge(&ctx(), GEM_A, GEM_B)
            .unwrap();

        assert_eq!(intent.target.function, MERGE_FUNCTION);
        let objects: Vec<_> = intent.object_arguments().collect();
        assert_eq!(objects.len(), 4);
        assert_eq!(
            objects[1].shared,
            Some(SharedObject::immutable(RANDOM_INITIAL_SHARED_VERSION))
        );
        assert!(objects[1].id.as_str().ends_with("08"));
        assert_eq!(objects[2].id.as_str(), GEM_A);
        assert_eq!(objects[3].id.as_str(), GEM_B);
        assert!(intent.transfer.is_some());
    }

    #[test]
    fn burn_has_no_transfer() {
        let intent = GemContract::default().build_burn(&ctx(), GEM_A).unwrap();

        assert_eq!(intent.target.function, BURN_FUNCTION);
        assert_eq!(intent.arguments.len(), 3);
        assert_eq!(intent.arguments[2].as_object().unwrap().id.as_str(), GEM_A);
        assert!(intent.transfer.is_none());
        assert_eq!(intent.sender.as_str(), SIGNER);
    }

    #[test]
    fn malformed_input_is_rejected_before_construction() {
        let contract = GemContract::default();

        assert_eq!(
            contract.build_mint(&ctx(), GemType::Blue, "  "),
            Err(BuildError::EmptyGemName)
        );
        assert!(matches!(
            contract.build_merge(&ctx(), "", GEM_B),
            Err(BuildError::InvalidIdentifier {
                source: IdentifierError::Empty,
                ..
            })
        ));
        assert!(matches!(
            contract.build_burn(&ctx(), "gem"),
            Err(BuildError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            contract.build_merge(&ctx(), GEM_A, GEM_A),
            Err(BuildError::SelfMerge(_))
        ));
    }

    #[test]
    fn default_ids_are_canonical() {
        let contract = GemContract::default();
        for id in [
            &contract.package_id,
            &contract.admin_cap,
            &contract.registry,
            &contract.random.id,
        ] {
            assert_eq!(&ObjectId::parse(id.as_str()).unwrap(), id);
        }
    }

    #[test]
    fn gem_type_parses_known_colours_only() {
        for gem_type in GemType::iter() {
            assert_eq!(GemType::parse(&gem_type.to_string()).unwrap(), gem_type);
        }
        assert_eq!(GemType::parse("RED").unwrap(), GemType::Red);
        assert!(matches!(
            GemType::parse("purple"),
            Err(BuildError::UnknownGemType(_))
        ));
    }
}
