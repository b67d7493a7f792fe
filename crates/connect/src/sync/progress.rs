//! Progress reporting for sync runs.
//!
//! The orchestrator and committer report through this trait so the binary
//! can decide how progress is surfaced.

use log::{error, info, warn};

use super::models::{CommitOutcome, CommitSummary, SyncStage};

/// Trait for reporting sync progress.
pub trait SyncProgressReporter: Send + Sync {
    /// Report that the run entered a new stage.
    fn report_stage(&self, stage: SyncStage);

    /// Report the outcome of one asset update (`position` is 1-based).
    fn report_commit(&self, position: usize, total: usize, outcome: &CommitOutcome);

    /// Report that the commit phase finished.
    fn report_commit_complete(&self, summary: &CommitSummary);
}

/// A no-op progress reporter for contexts where progress reporting is not needed.
#[derive(Debug, Clone, Default)]
pub struct NoOpProgressReporter;

impl SyncProgressReporter for NoOpProgressReporter {
    fn report_stage(&self, _stage: SyncStage) {
        // No-op
    }

    fn report_commit(&self, _position: usize, _total: usize, _outcome: &CommitOutcome) {
        // No-op
    }

    fn report_commit_complete(&self, _summary: &CommitSummary) {
        // No-op
    }
}

/// Reports progress through the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogProgressReporter;

impl SyncProgressReporter for LogProgressReporter {
    fn report_stage(&self, stage: SyncStage) {
        info!("[Sync] Stage: {}", stage);
    }

    fn report_commit(&self, position: usize, total: usize, outcome: &CommitOutcome) {
        match &outcome.error {
            None => info!(
                "[Committer] ({}/{}) Updated asset '{}' ({})",
                position, total, outcome.asset_codename, outcome.asset_id
            ),
            Some(err) => error!(
                "[Committer] ({}/{}) Failed to update asset '{}' ({}): {}",
                position, total, outcome.asset_codename, outcome.asset_id, err
            ),
        }
    }

    fn report_commit_complete(&self, summary: &CommitSummary) {
        if summary.has_failures() {
            warn!(
                "[Committer] Finished: {} updated, {} failed",
                summary.updated(),
                summary.failed()
            );
            for failure in summary.failures() {
                warn!(
                    "[Committer] Not updated: '{}' ({})",
                    failure.asset_codename, failure.asset_id
                );
            }
        } else {
            info!("[Committer] Finished: {} updated", summary.updated());
        }
    }
}
