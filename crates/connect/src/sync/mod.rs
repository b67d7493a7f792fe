//! Sync module - fetch, preview, confirm and commit a taxonomy sync run.

mod committer;
mod models;
mod orchestrator;
mod progress;
mod traits;

pub use committer::commit_rows;
pub use models::{
    CommitOutcome, CommitStatus, CommitSummary, Decision, RunOutcome, SyncConfig, SyncPlan,
    SyncStage,
};
pub use orchestrator::SyncOrchestrator;
pub use progress::{LogProgressReporter, NoOpProgressReporter, SyncProgressReporter};
pub use traits::{ConfirmationGate, ContentApiClient, ReportPublisher};
