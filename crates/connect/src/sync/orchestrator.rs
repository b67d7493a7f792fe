//! Sync orchestrator.
//!
//! Drives one run end to end: fetch both environments, remap, publish the
//! report, ask for confirmation, then commit.

use std::sync::Arc;

use log::{info, warn};

use super::committer::commit_rows;
use super::models::{CommitSummary, Decision, RunOutcome, SyncConfig, SyncPlan, SyncStage};
use super::progress::SyncProgressReporter;
use super::traits::{ConfirmationGate, ContentApiClient, ReportPublisher};
use termsync_core::errors::Result;
use termsync_core::remap::plan_remap;

/// Orchestrates a taxonomy sync between a source and a target environment.
///
/// # Example
///
/// ```ignore
/// let orchestrator = SyncOrchestrator::new(
///     Arc::new(source_client),
///     Arc::new(target_client),
///     Arc::new(LogProgressReporter),
///     SyncConfig::from_config(&config),
/// );
/// let outcome = orchestrator.run(&publisher, &gate).await?;
/// ```
pub struct SyncOrchestrator<P: SyncProgressReporter> {
    source: Arc<dyn ContentApiClient>,
    target: Arc<dyn ContentApiClient>,
    progress_reporter: Arc<P>,
    config: SyncConfig,
}

impl<P: SyncProgressReporter> SyncOrchestrator<P> {
    /// Create a new sync orchestrator.
    pub fn new(
        source: Arc<dyn ContentApiClient>,
        target: Arc<dyn ContentApiClient>,
        progress_reporter: Arc<P>,
        config: SyncConfig,
    ) -> Self {
        Self {
            source,
            target,
            progress_reporter,
            config,
        }
    }

    /// Fetch both environments and compute the rows to preview and commit.
    ///
    /// Fetches run strictly in order and any failure ends the run. Every
    /// recoverable anomaly is logged as a warning and kept in the plan.
    pub async fn prepare(&self) -> Result<SyncPlan> {
        self.progress_reporter.report_stage(SyncStage::FetchingSource);
        let source_assets = self.source.list_assets().await?;
        let source_groups = self.source.list_taxonomies().await?;

        self.progress_reporter.report_stage(SyncStage::FetchingTarget);
        let target_assets = self.target.list_assets().await?;
        let target_groups = self.target.list_taxonomies().await?;

        self.progress_reporter.report_stage(SyncStage::Remapping);
        let outcome = plan_remap(&source_assets, &source_groups, &target_assets, &target_groups);

        for warning in &outcome.warnings {
            warn!("[Sync] {}", warning);
        }

        let stats = &outcome.stats;
        info!(
            "[Sync] {} source / {} target assets, {} paired, {} of {} terms mapped, {} to update",
            stats.source_assets,
            stats.target_assets,
            stats.paired_assets,
            stats.mapped_terms,
            stats.source_terms,
            stats.assets_to_update
        );

        Ok(SyncPlan::new(
            self.source.environment_id(),
            self.target.environment_id(),
            outcome,
        ))
    }

    /// Send the plan's payloads to the target environment.
    pub async fn commit(&self, plan: &SyncPlan) -> CommitSummary {
        self.progress_reporter.report_stage(SyncStage::Committing);
        let summary = commit_rows(
            &*self.target,
            &plan.rows,
            self.config.commit_concurrency,
            &*self.progress_reporter,
        )
        .await;
        self.progress_reporter.report_commit_complete(&summary);
        summary
    }

    /// Run a full sync: prepare -> publish -> confirm -> commit.
    ///
    /// The report is published on every run. When nothing needs updating the
    /// gate is never consulted.
    pub async fn run(
        &self,
        publisher: &dyn ReportPublisher,
        gate: &dyn ConfirmationGate,
    ) -> Result<RunOutcome> {
        let plan = self.prepare().await?;

        self.progress_reporter.report_stage(SyncStage::Publishing);
        let report_path = publisher.publish(&plan)?;
        info!("[Sync] Report written to {}", report_path.display());

        if plan.is_empty() {
            info!("[Sync] No assets need updating. Nothing to commit.");
            self.progress_reporter.report_stage(SyncStage::Done);
            return Ok(RunOutcome::NothingToDo);
        }

        self.progress_reporter
            .report_stage(SyncStage::AwaitingConfirmation);
        let outcome = match gate.confirm(&plan, &report_path)? {
            Decision::Abort => {
                info!("[Sync] Aborted. No changes were made.");
                RunOutcome::Aborted
            }
            Decision::Proceed => RunOutcome::Committed(self.commit(&plan).await),
        };

        self.progress_reporter.report_stage(SyncStage::Done);
        Ok(outcome)
    }
}
