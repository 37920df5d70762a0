//! Type conversion utilities for Sui blockchain.
//!
//! ## Conversion Categories
//!
//! 1. **Identifiers**: core `ObjectId` ↔ Sui `ObjectID`
//! 2. **Addresses**: core `SuiAddress` ↔ Sui `SuiAddress`
//! 3. **Effects**: Sui `ObjectChange` → core `ObjectChange`

use aura_chain_core::{ObjectChange, ObjectId, SuiAddress};
use sui_json_rpc_types::ObjectChange as SdkObjectChange;
use sui_types::base_types::{ObjectID, SuiAddress as SdkAddress};

use crate::core::error::{Result, SuiError};

// ============================================================================
// Identifier Conversions
// ============================================================================

pub fn to_sdk_object_id(id: &ObjectId) -> Result<ObjectID> {
    id.as_str()
        .parse()
        .map_err(|e| SuiError::InvalidConfig(format!("Invalid object ID {}: {}", id, e)))
}

pub fn from_sdk_object_id(id: &ObjectID) -> Result<ObjectId> {
    ObjectId::parse(&id.to_hex_literal())
        .map_err(|e| SuiError::TransactionFailed(format!("Node returned bad object ID: {}", e)))
}

// ============================================================================
// Address Conversions
// ============================================================================

pub fn to_sdk_address(address: &SuiAddress) -> Result<SdkAddress> {
    address
        .as_str()
        .parse()
        .map_err(|e| SuiError::InvalidConfig(format!("Invalid address {}: {}", address, e)))
}

pub fn from_sdk_address(address: &SdkAddress) -> Result<SuiAddress> {
    SuiAddress::parse(&address.to_string())
        .map_err(|e| SuiError::InvalidConfig(format!("Invalid signer address: {}", e)))
}

// ============================================================================
// Effect Conversions
// ============================================================================

/// Map one SDK object change onto the ledger-agnostic representation.
pub fn from_sdk_change(change: &SdkObjectChange) -> Result<ObjectChange> {
    Ok(match change {
        SdkObjectChange::Created {
            object_id,
            object_type,
            ..
        } => ObjectChange::Created {
            object_id: from_sdk_object_id(object_id)?,
            object_type: object_type.to_string(),
        },
        SdkObjectChange::Mutated {
            object_id,
            object_type,
            ..
        } => ObjectChange::Mutated {
            object_id: from_sdk_object_id(object_id)?,
            object_type: object_type.to_string(),
        },
        SdkObjectChange::Transferred { object_id, .. } => ObjectChange::Transferred {
            object_id: from_sdk_object_id(object_id)?,
        },
        SdkObjectChange::Deleted { object_id, .. } => ObjectChange::Deleted {
            object_id: from_sdk_object_id(object_id)?,
        },
        SdkObjectChange::Wrapped { object_id, .. } => ObjectChange::Wrapped {
            object_id: from_sdk_object_id(object_id)?,
        },
        SdkObjectChange::Published { package_id, .. } => ObjectChange::Published {
            package_id: from_sdk_object_id(package_id)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_system_ids_round_trip_through_sdk() {
        let random = ObjectId::parse("0x8").unwrap();
        let sdk = to_sdk_object_id(&random).unwrap();
        assert_eq!(from_sdk_object_id(&sdk).unwrap(), random);
    }

    #[test]
    fn addresses_convert_to_sdk() {
        let address = SuiAddress::parse(&format!("0x{}", "1f".repeat(32))).unwrap();
        let sdk = to_sdk_address(&address).unwrap();
        assert_eq!(from_sdk_address(&sdk).unwrap(), address);
    }
}
