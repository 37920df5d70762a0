//! Sui blockchain client implementation.

use async_trait::async_trait;
use shared_crypto::intent::{Intent, IntentMessage};
use sui_json_rpc_types::{
    SuiExecutionStatus, SuiObjectDataOptions, SuiTransactionBlockEffectsAPI,
    SuiTransactionBlockResponseOptions,
};
use sui_sdk::{SuiClient, SuiClientBuilder};
use sui_types::Identifier;
use sui_types::base_types::{ObjectRef as SdkObjectRef, SequenceNumber, SuiAddress as SdkAddress};
use sui_types::object::Owner;
use sui_types::programmable_transaction_builder::ProgrammableTransactionBuilder;
use sui_types::transaction::{
    Argument, ObjectArg, ProgrammableTransaction, SharedObjectMutability, Transaction,
    TransactionData,
};

use aura_chain_core::{
    CallArg, EpochSource, ExecutionResult, Ledger, ObjectRef, TransactionExecutor,
    TransactionIntent, TransportError, TxDigest,
};

use crate::config::SuiConfig;
use crate::core::error::{Result, SuiError};
use crate::signer::AdminSigner;
use crate::utils::{from_sdk_change, to_sdk_address, to_sdk_object_id};

/// Sui blockchain client.
///
/// Reads the epoch clock for zkLogin sessions and, when a signer is attached,
/// signs and executes gem contract calls built by `aura-chain-core`.
pub struct SuiLedgerClient {
    config: SuiConfig,
    client: SuiClient,
    signer: Option<AdminSigner>,
}

impl SuiLedgerClient {
    /// Connect to the configured RPC endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid or the node is unreachable.
    pub async fn connect(config: SuiConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            "Connecting to Sui {} at {}",
            config.network.as_str(),
            config.rpc_url()
        );
        let client = SuiClientBuilder::default()
            .build(config.rpc_url())
            .await
            .map_err(|e| SuiError::Network(format!("Failed to connect to Sui RPC: {}", e)))?;

        Ok(Self {
            config,
            client,
            signer: None,
        })
    }

    /// Attach the keypair used by [`TransactionExecutor::execute`].
    pub fn with_signer(mut self, signer: AdminSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn signer(&self) -> Option<&AdminSigner> {
        self.signer.as_ref()
    }

    pub fn config(&self) -> &SuiConfig {
        &self.config
    }

    async fn fetch_epoch(&self) -> Result<u64> {
        let state = self
            .client
            .governance_api()
            .get_latest_sui_system_state()
            .await
            .map_err(|e| SuiError::Network(format!("Failed to fetch system state: {}", e)))?;
        Ok(state.epoch)
    }

    /// Get gas coin for transaction payment.
    ///
    /// Fetches the first available gas coin for the given address.
    async fn get_gas_coin(&self, owner: SdkAddress) -> Result<SdkObjectRef> {
        let gas_coins = self
            .client
            .coin_read_api()
            .get_coins(owner, None, None, None)
            .await
            .map_err(|e| SuiError::Network(format!("Failed to get gas coins: {}", e)))?;

        let gas_coin = gas_coins.data.first().ok_or_else(|| {
            SuiError::TransactionFailed(format!("No gas coins available for address {}", owner))
        })?;

        tracing::debug!(
            "Using gas coin: {} with balance: {}",
            gas_coin.coin_object_id,
            gas_coin.balance
        );

        Ok(gas_coin.object_ref())
    }

    /// Resolve an object argument to a PTB input.
    ///
    /// Shared references carry their metadata already. Anything else is
    /// looked up on-chain: a shared owner becomes a mutable shared input,
    /// otherwise the latest owned reference is used.
    async fn object_input(
        &self,
        ptb: &mut ProgrammableTransactionBuilder,
        object: &ObjectRef,
    ) -> Result<Argument> {
        let id = to_sdk_object_id(&object.id)?;

        let arg = match object.shared {
            Some(shared) => ObjectArg::SharedObject {
                id,
                initial_shared_version: SequenceNumber::from_u64(shared.initial_shared_version),
                mutability: if shared.mutable {
                    SharedObjectMutability::Mutable
                } else {
                    SharedObjectMutability::Immutable
                },
            },
            None => {
                let data = self
                    .client
                    .read_api()
                    .get_object_with_options(id, SuiObjectDataOptions::new().with_owner())
                    .await
                    .map_err(|e| SuiError::Network(format!("Failed to fetch object {}: {}", id, e)))?
                    .into_object()
                    .map_err(|_| SuiError::ObjectNotFound(object.id.to_string()))?;

                if let Some(Owner::Shared {
                    initial_shared_version,
                }) = &data.owner
                {
                    ObjectArg::SharedObject {
                        id,
                        initial_shared_version: *initial_shared_version,
                        mutability: SharedObjectMutability::Mutable,
                    }
                } else {
                    ObjectArg::ImmOrOwnedObject(data.object_ref())
                }
            }
        };

        ptb.obj(arg)
            .map_err(|e| SuiError::TransactionFailed(format!("Invalid object argument: {}", e)))
    }

    /// Translate an intent into a programmable transaction.
    async fn build_programmable(&self, intent: &TransactionIntent) -> Result<ProgrammableTransaction> {
        let mut ptb = ProgrammableTransactionBuilder::new();

        let mut arguments = Vec::with_capacity(intent.arguments.len());
        for arg in &intent.arguments {
            let input = match arg {
                CallArg::Object(object) => self.object_input(&mut ptb, object).await?,
                CallArg::PureString(value) => ptb.pure(value.clone()).map_err(|e| {
                    SuiError::TransactionFailed(format!("Failed to encode pure argument: {}", e))
                })?,
            };
            arguments.push(input);
        }

        let module = Identifier::new(intent.target.module.as_str())
            .map_err(|e| SuiError::InvalidConfig(format!("Invalid module name: {}", e)))?;
        let function = Identifier::new(intent.target.function.as_str())
            .map_err(|e| SuiError::InvalidConfig(format!("Invalid function name: {}", e)))?;

        let result = ptb.programmable_move_call(
            to_sdk_object_id(&intent.target.package)?,
            module,
            function,
            vec![], // No type arguments
            arguments,
        );

        if let Some(transfer) = &intent.transfer {
            ptb.transfer_arg(to_sdk_address(&transfer.recipient)?, result);
        }

        Ok(ptb.finish())
    }

    async fn sign_and_execute(&self, intent: &TransactionIntent) -> Result<ExecutionResult> {
        let signer = self.signer.as_ref().ok_or(SuiError::MissingSigner)?;

        let sender = to_sdk_address(&intent.sender)?;
        if sender != signer.address() {
            return Err(SuiError::InvalidKey(format!(
                "Intent sender {} does not match signer {}",
                sender,
                signer.address()
            )));
        }

        let pt = self.build_programmable(intent).await?;

        let gas_price = self
            .client
            .read_api()
            .get_reference_gas_price()
            .await
            .map_err(|e| SuiError::Network(format!("Failed to get reference gas price: {}", e)))?;

        let gas_coin = self.get_gas_coin(sender).await?;

        let tx_data = TransactionData::new_programmable(
            sender,
            vec![gas_coin],
            pt,
            self.config.gas_budget,
            gas_price,
        );

        let signature = sui_types::crypto::Signature::new_secure(
            &IntentMessage::new(Intent::sui_transaction(), &tx_data),
            signer.keypair(),
        );

        tracing::debug!("Executing {}...", intent.target);
        let response = self
            .client
            .quorum_driver_api()
            .execute_transaction_block(
                Transaction::from_data(tx_data, vec![signature]),
                SuiTransactionBlockResponseOptions::new()
                    .with_effects()
                    .with_object_changes(),
                None, // No execution options
            )
            .await
            .map_err(|e| SuiError::Network(format!("Failed to execute transaction: {}", e)))?;

        let digest = TxDigest::new(response.digest.to_string());

        let effects = response.effects.as_ref().ok_or_else(|| {
            SuiError::TransactionFailed(format!("No effects in response for {}", digest))
        })?;
        if let SuiExecutionStatus::Failure { error } = effects.status() {
            return Err(SuiError::ExecutionFailed {
                digest: digest.to_string(),
                error: error.clone(),
            });
        }

        let object_changes = response
            .object_changes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(from_sdk_change)
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("✓ {} executed: {}", intent.target, digest);

        Ok(ExecutionResult {
            digest,
            object_changes,
        })
    }
}

#[async_trait]
impl EpochSource for SuiLedgerClient {
    async fn current_epoch(&self) -> std::result::Result<u64, TransportError> {
        self.fetch_epoch().await.map_err(Into::into)
    }
}

#[async_trait]
impl TransactionExecutor for SuiLedgerClient {
    async fn execute(
        &self,
        intent: &TransactionIntent,
    ) -> std::result::Result<ExecutionResult, TransportError> {
        self.sign_and_execute(intent).await.map_err(Into::into)
    }
}

impl Ledger for SuiLedgerClient {
    fn name(&self) -> &str {
        "Sui"
    }

    fn network(&self) -> &str {
        self.config.network.as_str()
    }
}
