//! Ledger abstraction layer for the Aurayale gem contract.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: Ledger (composite trait)
//!          ├── EpochSource
//!          └── TransactionExecutor
//!
//! Pure:    GemContract builders → TransactionIntent
//! ```
//!
//! Builders never touch the network. A backend crate (`aura-chain-sui`)
//! turns intents into signed transactions and reports effects back as
//! [`ExecutionResult`]s.
//!
//! # Usage
//!
//! ```ignore
//! use aura_chain_core::{GemContract, GemType, SigningContext, TransactionExecutor};
//!
//! let contract = GemContract::from_env()?;
//! let intent = contract.build_mint(&ctx, GemType::Red, "gem_red_Brilliant")?;
//! let result = ledger.execute(&intent).await?;
//! let gem_id = result.first_created();
//! ```

pub mod address;
pub mod builder;
pub mod error;
pub mod intent;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use address::{is_valid_address, normalize_object_id};
pub use builder::{GemContract, GemType, SigningContext};
pub use error::{BuildError, IdentifierError, TransportError};
pub use intent::{CallArg, MoveTarget, TransactionIntent, TransferResult};
pub use traits::{EpochSource, Ledger, TransactionExecutor};
pub use types::{
    ExecutionResult, ObjectChange, ObjectId, ObjectRef, SharedObject, SuiAddress, TxDigest,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockLedger, MockOutcome};
