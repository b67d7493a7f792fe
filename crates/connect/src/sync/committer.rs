//! Commit phase: send each previewed payload to the target environment.

use futures::stream::{self, StreamExt};

use super::models::{CommitOutcome, CommitSummary};
use super::progress::SyncProgressReporter;
use super::traits::ContentApiClient;
use termsync_core::remap::ReportRow;

/// Replace every row's target asset with exactly `row.payload`.
///
/// At most `concurrency` updates are in flight (a value of 0 is treated as 1).
/// A failed update is recorded and never stops the remaining rows. Outcomes
/// are returned in row order.
pub async fn commit_rows<P>(
    client: &dyn ContentApiClient,
    rows: &[ReportRow],
    concurrency: usize,
    reporter: &P,
) -> CommitSummary
where
    P: SyncProgressReporter + ?Sized,
{
    let total = rows.len();

    let outcomes: Vec<CommitOutcome> = stream::iter(rows.iter().enumerate())
        .map(|(index, row)| async move {
            let outcome = match client.upsert_asset(&row.payload).await {
                Ok(_) => CommitOutcome::updated(row),
                Err(e) => CommitOutcome::failed(row, e.to_string()),
            };
            reporter.report_commit(index + 1, total, &outcome);
            outcome
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    CommitSummary::new(outcomes)
}
