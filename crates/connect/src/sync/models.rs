//! Models for sync runs: the plan, the operator decision and commit results.

use serde::{Deserialize, Serialize};

use termsync_core::config::Config;
use termsync_core::constants::DEFAULT_COMMIT_CONCURRENCY;
use termsync_core::remap::{RemapOutcome, RemapStats, RemapWarning, ReportRow};

/// Configuration for sync operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Maximum number of asset updates in flight at once.
    pub commit_concurrency: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            commit_concurrency: DEFAULT_COMMIT_CONCURRENCY,
        }
    }
}

impl SyncConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            commit_concurrency: config.commit_concurrency.max(1),
        }
    }
}

/// Everything computed before the confirmation gate.
///
/// The rows carry the exact payloads that will be sent on commit, so the
/// report and the commit phase always see the same data.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub source_environment_id: String,
    pub target_environment_id: String,
    pub rows: Vec<ReportRow>,
    pub warnings: Vec<RemapWarning>,
    pub stats: RemapStats,
}

impl SyncPlan {
    pub fn new(
        source_environment_id: impl Into<String>,
        target_environment_id: impl Into<String>,
        outcome: RemapOutcome,
    ) -> Self {
        Self {
            source_environment_id: source_environment_id.into(),
            target_environment_id: target_environment_id.into(),
            rows: outcome.rows,
            warnings: outcome.warnings,
            stats: outcome.stats,
        }
    }

    /// True when no asset needs updating.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Operator decision at the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Abort,
}

/// Result of one asset update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommitStatus {
    Updated,
    Failed,
}

impl std::fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitStatus::Updated => write!(f, "updated"),
            CommitStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of updating one target asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitOutcome {
    pub asset_id: String,
    pub asset_codename: String,
    pub status: CommitStatus,
    /// Error message when the update failed
    pub error: Option<String>,
}

impl CommitOutcome {
    pub fn updated(row: &ReportRow) -> Self {
        Self {
            asset_id: row.target.id.clone(),
            asset_codename: row.target.codename.clone(),
            status: CommitStatus::Updated,
            error: None,
        }
    }

    pub fn failed(row: &ReportRow, error: impl Into<String>) -> Self {
        Self {
            asset_id: row.target.id.clone(),
            asset_codename: row.target.codename.clone(),
            status: CommitStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CommitStatus::Updated
    }
}

/// Per-asset outcomes of a commit phase, in row order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
    pub outcomes: Vec<CommitOutcome>,
}

impl CommitSummary {
    pub fn new(outcomes: Vec<CommitOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.updated()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CommitOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No asset needed updating; nothing was sent.
    NothingToDo,
    /// The operator declined; nothing was sent.
    Aborted,
    /// The commit phase ran.
    Committed(CommitSummary),
}

/// Stage of a sync run, reported to progress reporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    FetchingSource,
    FetchingTarget,
    Remapping,
    Publishing,
    AwaitingConfirmation,
    Committing,
    Done,
}

impl std::fmt::Display for SyncStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStage::FetchingSource => write!(f, "fetching source environment"),
            SyncStage::FetchingTarget => write!(f, "fetching target environment"),
            SyncStage::Remapping => write!(f, "remapping taxonomy terms"),
            SyncStage::Publishing => write!(f, "publishing report"),
            SyncStage::AwaitingConfirmation => write!(f, "awaiting confirmation"),
            SyncStage::Committing => write!(f, "committing updates"),
            SyncStage::Done => write!(f, "done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termsync_core::assets::Asset;
    use termsync_core::remap::AssetSummary;

    fn row(id: &str, codename: &str) -> ReportRow {
        let asset = Asset::new(id, codename);
        ReportRow {
            source: AssetSummary::from(&asset),
            target: AssetSummary::from(&asset),
            diffs: Vec::new(),
            payload: asset,
        }
    }

    #[test]
    fn test_sync_config_default() {
        assert_eq!(SyncConfig::default().commit_concurrency, 1);
    }

    #[test]
    fn test_commit_summary_counts() {
        let summary = CommitSummary::new(vec![
            CommitOutcome::updated(&row("a1", "one")),
            CommitOutcome::failed(&row("a2", "two"), "HTTP 500"),
            CommitOutcome::updated(&row("a3", "three")),
        ]);

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.updated(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(summary.has_failures());

        let failures: Vec<_> = summary.failures().collect();
        assert_eq!(failures[0].asset_codename, "two");
        assert_eq!(failures[0].error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_empty_summary_has_no_failures() {
        let summary = CommitSummary::default();
        assert_eq!(summary.total(), 0);
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_commit_outcome_serialization() {
        let outcome = CommitOutcome::failed(&row("a1", "photo"), "boom");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["assetId"], "a1");
        assert_eq!(json["assetCodename"], "photo");
        assert_eq!(json["status"], "failed");
    }
}
