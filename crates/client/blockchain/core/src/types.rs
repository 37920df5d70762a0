//! Common types for ledger interactions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::{is_valid_address, normalize_object_id};
use crate::error::IdentifierError;

// ============================================================================
// Identifiers
// ============================================================================

/// On-chain object identifier in canonical 64-digit form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and normalize an object ID (`0x` + 1..=64 hex digits).
    pub fn parse(object_id: &str) -> Result<Self, IdentifierError> {
        let trimmed = object_id.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        normalize_object_id(trimmed)
            .map(Self)
            .ok_or_else(|| IdentifierError::InvalidObjectId(object_id.to_string()))
    }

    /// Wrap an ID already in canonical form.
    pub(crate) fn from_canonical(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ObjectId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account address (`0x` + exactly 64 hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuiAddress(String);

impl SuiAddress {
    pub fn parse(address: &str) -> Result<Self, IdentifierError> {
        if is_valid_address(address) {
            Ok(Self(address.to_ascii_lowercase()))
        } else {
            Err(IdentifierError::InvalidAddress(address.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SuiAddress {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SuiAddress {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SuiAddress> for String {
    fn from(address: SuiAddress) -> Self {
        address.0
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction digest as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxDigest(pub String);

impl TxDigest {
    pub fn new(digest: String) -> Self {
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Object References
// ============================================================================

/// Shared-object metadata required to pass a shared object as an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedObject {
    pub initial_shared_version: u64,
    pub mutable: bool,
}

impl SharedObject {
    /// Immutable shared reference, as used for system objects.
    pub const fn immutable(initial_shared_version: u64) -> Self {
        Self {
            initial_shared_version,
            mutable: false,
        }
    }
}

/// Reference to an on-chain object consumed or produced by a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: ObjectId,

    /// `None` for owned/immutable objects, resolved by the node at signing time.
    pub shared: Option<SharedObject>,
}

impl ObjectRef {
    /// Reference an owned or immutable object.
    pub fn owned(id: ObjectId) -> Self {
        Self { id, shared: None }
    }

    /// Reference a shared object at a known initial version.
    pub fn shared(id: ObjectId, initial_shared_version: u64, mutable: bool) -> Self {
        Self {
            id,
            shared: Some(SharedObject {
                initial_shared_version,
                mutable,
            }),
        }
    }

    pub fn is_shared(&self) -> bool {
        self.shared.is_some()
    }
}

// ============================================================================
// Execution Results
// ============================================================================

/// A single object change reported in transaction effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    #[serde(rename_all = "camelCase")]
    Created {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Mutated {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Transferred { object_id: ObjectId },
    #[serde(rename_all = "camelCase")]
    Deleted { object_id: ObjectId },
    #[serde(rename_all = "camelCase")]
    Wrapped { object_id: ObjectId },
    #[serde(rename_all = "camelCase")]
    Published { package_id: ObjectId },
}

impl ObjectChange {
    pub fn created_id(&self) -> Option<&ObjectId> {
        match self {
            ObjectChange::Created { object_id, .. } => Some(object_id),
            _ => None,
        }
    }
}

/// Outcome of a successfully executed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub digest: TxDigest,
    pub object_changes: Vec<ObjectChange>,
}

impl ExecutionResult {
    /// First object created by the transaction, in effect order.
    pub fn first_created(&self) -> Option<&ObjectId> {
        self.object_changes.iter().find_map(ObjectChange::created_id)
    }

    /// All objects created by the transaction.
    pub fn created(&self) -> impl Iterator<Item = &ObjectId> {
        self.object_changes.iter().filter_map(ObjectChange::created_id)
    }
}
