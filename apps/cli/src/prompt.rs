//! Confirmation gates for the terminal.

use std::io::{BufRead, Write};
use std::path::Path;

use termsync_connect::{ConfirmationGate, Decision, SyncPlan};
use termsync_core::errors::Result;

/// Only `y` or `yes` (any case, surrounding whitespace ignored) proceeds.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Ask once and read one line. End of input counts as a refusal.
pub fn ask<R: BufRead, W: Write>(
    plan: &SyncPlan,
    report_path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<Decision> {
    writeln!(
        output,
        "{} asset(s) in environment {} will be updated. Review the report at {}",
        plan.rows.len(),
        plan.target_environment_id,
        report_path.display()
    )?;
    write!(output, "Proceed? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(if is_affirmative(&answer) {
        Decision::Proceed
    } else {
        Decision::Abort
    })
}

/// Prompts on stdout and reads the answer from stdin.
#[derive(Debug, Default)]
pub struct StdinConfirmationGate;

impl ConfirmationGate for StdinConfirmationGate {
    fn confirm(&self, plan: &SyncPlan, report_path: &Path) -> Result<Decision> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        ask(plan, report_path, &mut stdin.lock(), &mut stdout.lock())
    }
}

/// Proceeds without asking (`--yes`).
#[derive(Debug, Default)]
pub struct AutoApproveGate;

impl ConfirmationGate for AutoApproveGate {
    fn confirm(&self, plan: &SyncPlan, _report_path: &Path) -> Result<Decision> {
        tracing::info!(
            "Confirmation skipped, committing {} asset(s)",
            plan.rows.len()
        );
        Ok(Decision::Proceed)
    }
}

/// Never proceeds (`--dry-run`).
#[derive(Debug, Default)]
pub struct DryRunGate;

impl ConfirmationGate for DryRunGate {
    fn confirm(&self, plan: &SyncPlan, _report_path: &Path) -> Result<Decision> {
        tracing::info!("Dry run: {} asset(s) would be updated", plan.rows.len());
        Ok(Decision::Abort)
    }
}
