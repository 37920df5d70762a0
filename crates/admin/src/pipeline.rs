//! Mint → merge → burn pipeline.
//!
//! Steps run strictly in sequence with a settle delay between dependent
//! mutations. A step whose result has no created object aborts the run;
//! mutations that already landed are not undone. Rerunning from the
//! artifact file is the recovery path.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use aura_chain_core::{
    ExecutionResult, GemContract, GemType, ObjectId, SigningContext, TransactionExecutor,
    TransactionIntent, TxDigest,
};

use crate::artifact::MintArtifact;
use crate::error::PipelineError;

/// First gem minted by [`GemPipeline::mint_pair`].
pub const FIRST_GEM: (GemType, &str) = (GemType::Red, "gem_red_Brilliant");

/// Second gem minted by [`GemPipeline::mint_pair`].
pub const SECOND_GEM: (GemType, &str) = (GemType::Blue, "gem_blue_Heart");

/// A step that produced a new object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedObject {
    pub object_id: ObjectId,
    pub digest: TxDigest,
}

/// Summary of a merge-and-burn run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeBurnReport {
    pub merged_id: ObjectId,
    pub merge_digest: TxDigest,
    pub burn_digest: TxDigest,
}

/// Admin pipeline over any transaction executor.
pub struct GemPipeline<E> {
    executor: E,
    contract: GemContract,
    ctx: SigningContext,
    settle: Duration,
}

impl<E: TransactionExecutor> GemPipeline<E> {
    pub fn new(executor: E, contract: GemContract, ctx: SigningContext, settle: Duration) -> Self {
        Self {
            executor,
            contract,
            ctx,
            settle,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    async fn submit(
        &self,
        step: &'static str,
        intent: TransactionIntent,
    ) -> Result<ExecutionResult, PipelineError> {
        self.executor
            .execute(&intent)
            .await
            .map_err(|source| PipelineError::Transport { step, source })
    }

    fn created(
        step: &'static str,
        result: ExecutionResult,
    ) -> Result<CreatedObject, PipelineError> {
        match result.first_created().cloned() {
            Some(object_id) => Ok(CreatedObject {
                object_id,
                digest: result.digest,
            }),
            None => Err(PipelineError::NoCreatedObject {
                step,
                digest: result.digest,
            }),
        }
    }

    async fn settle(&self) {
        if !self.settle.is_zero() {
            tracing::debug!("Waiting {:?} for the network to settle", self.settle);
            tokio::time::sleep(self.settle).await;
        }
    }

    /// Mint one gem and return its object ID.
    pub async fn mint(
        &self,
        gem_type: GemType,
        gem_name: &str,
    ) -> Result<CreatedObject, PipelineError> {
        let intent = self.contract.build_mint(&self.ctx, gem_type, gem_name)?;
        let result = self.submit("mint", intent).await?;
        let gem = Self::created("mint", result)?;

        tracing::info!("{} gem minted: {} (tx {})", gem_type, gem.object_id, gem.digest);
        Ok(gem)
    }

    /// Merge `burn` into `main`, returning the merged gem.
    pub async fn merge(&self, main: &str, burn: &str) -> Result<CreatedObject, PipelineError> {
        let intent = self.contract.build_merge(&self.ctx, main, burn)?;
        let result = self.submit("merge", intent).await?;
        let merged = Self::created("merge", result)?;

        tracing::info!("Gems merged: {} (tx {})", merged.object_id, merged.digest);
        Ok(merged)
    }

    pub async fn burn(&self, object_id: &str) -> Result<TxDigest, PipelineError> {
        let intent = self.contract.build_burn(&self.ctx, object_id)?;
        let result = self.submit("burn", intent).await?;

        tracing::info!("Gem burned: {} (tx {})", object_id, result.digest);
        Ok(result.digest)
    }

    /// Mint the red and blue gems and record them in `artifact_path`.
    pub async fn mint_pair(&self, artifact_path: &Path) -> Result<MintArtifact, PipelineError> {
        let (first_type, first_name) = FIRST_GEM;
        let (second_type, second_name) = SECOND_GEM;

        let red = self.mint(first_type, first_name).await?;
        self.settle().await;
        let blue = self.mint(second_type, second_name).await?;

        let artifact = MintArtifact {
            red_gem_id: red.object_id.to_string(),
            blue_gem_id: blue.object_id.to_string(),
            timestamp: Utc::now(),
            red_gem_tx_hash: red.digest.to_string(),
            blue_gem_tx_hash: blue.digest.to_string(),
        };
        artifact.save(artifact_path)?;

        tracing::info!("NFT object IDs saved to {}", artifact_path.display());
        Ok(artifact)
    }

    /// Merge the recorded pair, then burn the merged gem.
    pub async fn merge_and_burn(
        &self,
        artifact_path: &Path,
    ) -> Result<MergeBurnReport, PipelineError> {
        let artifact = MintArtifact::load(artifact_path)?;
        let (red, blue) = artifact.gem_ids()?;
        tracing::info!(
            "Loaded gems from {}: red={}, blue={}",
            artifact_path.display(),
            red,
            blue
        );

        let merged = self.merge(red, blue).await?;
        self.settle().await;
        let burn_digest = self.burn(merged.object_id.as_str()).await?;

        let report = MergeBurnReport {
            merged_id: merged.object_id,
            merge_digest: merged.digest,
            burn_digest,
        };
        tracing::info!(
            "Summary: merged {} (tx {}), burned (tx {})",
            report.merged_id,
            report.merge_digest,
            report.burn_digest
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_chain_core::address::HEX_LEN;
    use aura_chain_core::builder::{BURN_FUNCTION, MERGE_FUNCTION, MINT_FUNCTION};
    use aura_chain_core::mock::mock_object_id;
    use aura_chain_core::{CallArg, MockLedger, MockOutcome, SuiAddress};
    use tokio::time::Instant;

    use crate::artifact::DEFAULT_ARTIFACT;
    use crate::error::ArtifactError;

    const SETTLE: Duration = Duration::from_secs(1);

    fn pipeline(ledger: &MockLedger) -> GemPipeline<MockLedger> {
        let signer = SuiAddress::parse(&format!("0x{}", "5".repeat(HEX_LEN))).unwrap();
        GemPipeline::new(
            ledger.clone(),
            GemContract::default(),
            SigningContext::new(signer),
            SETTLE,
        )
    }

    fn functions(ledger: &MockLedger) -> Vec<String> {
        ledger
            .executed()
            .into_iter()
            .map(|intent| intent.target.function)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn mint_pair_records_both_gems() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_ARTIFACT);
        let ledger = MockLedger::new(1);

        let started = Instant::now();
        let artifact = pipeline(&ledger).mint_pair(&path).await.unwrap();
        assert!(started.elapsed() >= SETTLE);

        assert_eq!(artifact.red_gem_id, mock_object_id(1).to_string());
        assert_eq!(artifact.blue_gem_id, mock_object_id(2).to_string());
        assert_eq!(artifact.red_gem_tx_hash, "mock-digest-1");
        assert_eq!(MintArtifact::load(&path).unwrap(), artifact);

        let executed = ledger.executed();
        assert_eq!(functions(&ledger), [MINT_FUNCTION, MINT_FUNCTION]);
        assert_eq!(executed[0].arguments[2].as_str(), Some("red"));
        assert_eq!(executed[0].arguments[3].as_str(), Some("gem_red_Brilliant"));
        assert_eq!(executed[1].arguments[2].as_str(), Some("blue"));
        assert_eq!(executed[1].arguments[3].as_str(), Some("gem_blue_Heart"));
    }

    #[tokio::test(start_paused = true)]
    async fn merge_then_burn_the_merged_gem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_ARTIFACT);
        let ledger = MockLedger::new(1);
        let pipeline = pipeline(&ledger);

        let artifact = pipeline.mint_pair(&path).await.unwrap();
        let report = pipeline.merge_and_burn(&path).await.unwrap();

        assert_eq!(
            functions(&ledger),
            [MINT_FUNCTION, MINT_FUNCTION, MERGE_FUNCTION, BURN_FUNCTION]
        );

        let executed = ledger.executed();
        let merge = &executed[2];
        let main = merge.arguments[2].as_object().unwrap();
        let burned = merge.arguments[3].as_object().unwrap();
        assert_eq!(main.id.as_str(), artifact.red_gem_id);
        assert_eq!(burned.id.as_str(), artifact.blue_gem_id);

        assert_eq!(report.merged_id, mock_object_id(3));
        let burn = &executed[3];
        assert_eq!(
            burn.arguments[2],
            CallArg::Object(aura_chain_core::ObjectRef::owned(report.merged_id.clone()))
        );
        assert!(burn.transfer.is_none());
        assert_eq!(report.burn_digest.as_str(), "mock-digest-4");
    }

    #[tokio::test(start_paused = true)]
    async fn burn_is_skipped_when_merge_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_ARTIFACT);
        let ledger = MockLedger::new(1);
        let pipeline = pipeline(&ledger);
        pipeline.mint_pair(&path).await.unwrap();

        ledger.push_outcome(MockOutcome::NoCreated);
        let err = pipeline.merge_and_burn(&path).await.unwrap_err();

        assert!(matches!(err, PipelineError::NoCreatedObject { step: "merge", .. }));
        assert_eq!(functions(&ledger), [MINT_FUNCTION, MINT_FUNCTION, MERGE_FUNCTION]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_merge_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_ARTIFACT);
        let ledger = MockLedger::new(1);
        let pipeline = pipeline(&ledger);
        pipeline.mint_pair(&path).await.unwrap();

        ledger.push_outcome(MockOutcome::Fail("InsufficientGas".to_string()));
        let err = pipeline.merge_and_burn(&path).await.unwrap_err();

        assert!(matches!(err, PipelineError::Transport { step: "merge", .. }));
        assert!(err.to_string().contains("InsufficientGas"));
        assert_eq!(ledger.executed().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn mint_without_created_object_stops_before_second_mint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_ARTIFACT);
        let ledger = MockLedger::new(1);

        ledger.push_outcome(MockOutcome::NoCreated);
        let err = pipeline(&ledger).mint_pair(&path).await.unwrap_err();

        assert!(matches!(err, PipelineError::NoCreatedObject { step: "mint", .. }));
        assert_eq!(ledger.executed().len(), 1);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn bad_artifact_fails_before_any_transaction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_ARTIFACT);
        let ledger = MockLedger::new(1);
        let pipeline = pipeline(&ledger);

        assert!(matches!(
            pipeline.merge_and_burn(&path).await,
            Err(PipelineError::Artifact(ArtifactError::Io { .. }))
        ));

        MintArtifact {
            red_gem_id: mock_object_id(1).to_string(),
            blue_gem_id: String::new(),
            timestamp: Utc::now(),
            red_gem_tx_hash: String::new(),
            blue_gem_tx_hash: String::new(),
        }
        .save(&path)
        .unwrap();

        assert!(matches!(
            pipeline.merge_and_burn(&path).await,
            Err(PipelineError::Artifact(ArtifactError::MissingId("blueGemId")))
        ));
        assert!(ledger.executed().is_empty());
    }

    #[tokio::test]
    async fn invalid_ids_are_rejected_by_the_builder() {
        let ledger = MockLedger::new(1);
        let pipeline = pipeline(&ledger);

        assert!(matches!(
            pipeline.burn("not-an-id").await,
            Err(PipelineError::Build(_))
        ));
        assert!(matches!(
            pipeline.merge("0x1", "0x01").await,
            Err(PipelineError::Build(_))
        ));
        assert!(ledger.executed().is_empty());
    }
}
