//! Mock ledger for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::address::HEX_LEN;
use crate::error::TransportError;
use crate::intent::TransactionIntent;
use crate::traits::{EpochSource, Ledger, TransactionExecutor};
use crate::types::{ExecutionResult, ObjectChange, ObjectId, TxDigest};

/// Scripted response for the next `execute` call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Succeed and report one created object per call (default behaviour).
    CreateOne,
    /// Succeed without any created object.
    NoCreated,
    /// Fail with the given transport error message.
    Fail(String),
}

#[derive(Default)]
struct MockState {
    epoch: u64,
    epoch_error: Option<String>,
    counter: u64,
    script: VecDeque<MockOutcome>,
    executed: Vec<TransactionIntent>,
}

/// In-memory ledger that records every intent it executes.
///
/// Without a script each call succeeds and reports one freshly created
/// object, which mirrors how mint and merge behave on-chain.
#[derive(Clone, Default)]
pub struct MockLedger {
    state: Arc<Mutex<MockState>>,
}

impl MockLedger {
    pub fn new(epoch: u64) -> Self {
        let ledger = Self::default();
        ledger.set_epoch(epoch);
        ledger
    }

    pub fn set_epoch(&self, epoch: u64) {
        self.state.lock().unwrap().epoch = epoch;
    }

    /// Make `current_epoch` fail until cleared with `None`.
    pub fn fail_epoch(&self, message: Option<&str>) {
        self.state.lock().unwrap().epoch_error = message.map(str::to_string);
    }

    /// Queue outcomes consumed by subsequent `execute` calls.
    pub fn push_outcome(&self, outcome: MockOutcome) {
        self.state.lock().unwrap().script.push_back(outcome);
    }

    /// Intents executed so far, in submission order.
    pub fn executed(&self) -> Vec<TransactionIntent> {
        self.state.lock().unwrap().executed.clone()
    }

    fn next_counter(state: &mut MockState) -> u64 {
        state.counter += 1;
        state.counter
    }
}

/// Deterministic object ID for the n-th object created by the mock.
pub fn mock_object_id(n: u64) -> ObjectId {
    ObjectId::from_canonical(format!("0x{:0>width$x}", n + 0xa000, width = HEX_LEN))
}

#[async_trait]
impl EpochSource for MockLedger {
    async fn current_epoch(&self) -> Result<u64, TransportError> {
        let state = self.state.lock().unwrap();
        match &state.epoch_error {
            Some(message) => Err(TransportError::NetworkError(message.clone())),
            None => Ok(state.epoch),
        }
    }
}

#[async_trait]
impl TransactionExecutor for MockLedger {
    async fn execute(&self, intent: &TransactionIntent) -> Result<ExecutionResult, TransportError> {
        let mut state = self.state.lock().unwrap();
        let outcome = state.script.pop_front().unwrap_or(MockOutcome::CreateOne);
        let n = Self::next_counter(&mut state);
        let digest = TxDigest::new(format!("mock-digest-{}", n));

        let mut object_changes: Vec<ObjectChange> = intent
            .object_arguments()
            .filter(|obj| !obj.is_shared())
            .map(|obj| ObjectChange::Mutated {
                object_id: obj.id.clone(),
                object_type: "mock::Object".to_string(),
            })
            .collect();

        match outcome {
            MockOutcome::Fail(error) => {
                return Err(TransportError::ExecutionFailed { digest, error });
            }
            MockOutcome::NoCreated => {}
            MockOutcome::CreateOne => {
                object_changes.push(ObjectChange::Created {
                    object_id: mock_object_id(n),
                    object_type: format!("{}::{}::Gem", intent.target.package, intent.target.module),
                });
            }
        }

        state.executed.push(intent.clone());

        Ok(ExecutionResult {
            digest,
            object_changes,
        })
    }
}

impl Ledger for MockLedger {
    fn name(&self) -> &str {
        "MockLedger"
    }

    fn network(&self) -> &str {
        "mock-network"
    }
}
