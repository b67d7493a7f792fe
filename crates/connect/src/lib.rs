//! termsync connect - management API access and sync orchestration.
//!
//! This crate talks to the content management API of both environments and
//! drives a run end to end: fetch, remap, preview, confirm, commit.

pub mod client;
pub mod sync;

// Re-export commonly used types
pub use client::{ManagementApiClient, DEFAULT_MAX_PAGES};
pub use sync::{
    commit_rows, CommitOutcome, CommitStatus, CommitSummary, ConfirmationGate, ContentApiClient,
    Decision, LogProgressReporter, NoOpProgressReporter, ReportPublisher, RunOutcome, SyncConfig,
    SyncOrchestrator, SyncPlan, SyncProgressReporter, SyncStage,
};
