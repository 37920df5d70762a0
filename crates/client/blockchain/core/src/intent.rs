//! Ledger-agnostic contract call plans.
//!
//! A [`TransactionIntent`] describes one Move call plus the transfers that
//! follow it. Backends translate it into their native transaction format
//! at signing time; the intent itself is never mutated after that.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ObjectRef, SuiAddress};

/// Fully qualified Move function (`package::module::function`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTarget {
    pub package: crate::types::ObjectId,
    pub module: String,
    pub function: String,
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// One positional argument to a Move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    Object(ObjectRef),
    PureString(String),
}

impl CallArg {
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            CallArg::Object(obj) => Some(obj),
            CallArg::PureString(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CallArg::PureString(s) => Some(s),
            CallArg::Object(_) => None,
        }
    }
}

/// Transfer of the call's return value to a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub recipient: SuiAddress,
}

/// Contract call plan produced by the transaction builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIntent {
    pub target: MoveTarget,
    pub arguments: Vec<CallArg>,
    pub sender: SuiAddress,
    pub transfer: Option<TransferResult>,
}

impl TransactionIntent {
    /// Object arguments in call order.
    pub fn object_arguments(&self) -> impl Iterator<Item = &ObjectRef> {
        self.arguments.iter().filter_map(CallArg::as_object)
    }
}
