//! Ledger abstraction traits.
//!
//! This module defines a small layered abstraction:
//! - Layer 0: EpochSource, TransactionExecutor (node access)
//! - Layer 1: Ledger (composite trait)

use async_trait::async_trait;

use crate::error::TransportError;
use crate::intent::TransactionIntent;
use crate::types::ExecutionResult;

// ============================================================================
// Layer 0: Node Access
// ============================================================================

/// Read access to the ledger's epoch clock.
#[async_trait]
pub trait EpochSource: Send + Sync {
    /// Current epoch as reported by the node.
    async fn current_epoch(&self) -> Result<u64, TransportError>;
}

/// Sign-and-submit facility for transaction intents.
///
/// Implementations sign with the identity named by the intent's sender and
/// wait for effects. A returned `Ok` means the transaction executed
/// successfully; any failure leaves no partial state from the caller's view.
#[async_trait]
pub trait TransactionExecutor: Send + Sync {
    async fn execute(&self, intent: &TransactionIntent) -> Result<ExecutionResult, TransportError>;
}

// ============================================================================
// Layer 1: Composite Trait
// ============================================================================

/// Complete ledger client used by the binaries.
pub trait Ledger: EpochSource + TransactionExecutor + Send + Sync {
    /// Ledger name (e.g., "Sui").
    fn name(&self) -> &str;

    /// Network name (e.g., "mainnet", "testnet", "local").
    fn network(&self) -> &str;
}
