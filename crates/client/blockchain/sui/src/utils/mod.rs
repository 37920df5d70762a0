//! Conversions between ledger-agnostic types and Sui SDK types.

pub mod conversion;

pub use conversion::{from_sdk_change, to_sdk_address, to_sdk_object_id};
