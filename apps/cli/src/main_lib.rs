use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use termsync_connect::{
    ConfirmationGate, LogProgressReporter, ManagementApiClient, RunOutcome, SyncConfig,
    SyncOrchestrator,
};
use termsync_core::config::Config;

use crate::cli::{Args, LogFormat};
use crate::prompt::{AutoApproveGate, DryRunGate, StdinConfirmationGate};
use crate::viewer::HtmlReportPublisher;

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(false)).init(),
    }
}

/// Whether a finished run should exit with a failure status.
///
/// Failed asset updates only count when `strict` is set.
pub fn is_failure(outcome: &RunOutcome, strict: bool) -> bool {
    match outcome {
        RunOutcome::Committed(summary) => strict && summary.has_failures(),
        RunOutcome::NothingToDo | RunOutcome::Aborted => false,
    }
}

fn confirmation_gate(args: &Args) -> Box<dyn ConfirmationGate> {
    if args.dry_run {
        Box::new(DryRunGate)
    } else if args.yes {
        Box::new(AutoApproveGate)
    } else {
        Box::new(StdinConfirmationGate)
    }
}

pub async fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config = args.apply(Config::from_env()?)?;
    tracing::info!(
        "Syncing taxonomy terms from {} to {}",
        config.source.environment_id,
        config.target.environment_id
    );

    let source = ManagementApiClient::new(&config.api_base_url, &config.source)?;
    let target = ManagementApiClient::new(&config.api_base_url, &config.target)?;
    let orchestrator = SyncOrchestrator::new(
        Arc::new(source),
        Arc::new(target),
        Arc::new(LogProgressReporter),
        SyncConfig::from_config(&config),
    );

    let publisher = HtmlReportPublisher::new(&config, !args.no_open)?;
    let gate = confirmation_gate(args);

    let outcome = orchestrator.run(&publisher, gate.as_ref()).await?;
    if let RunOutcome::Committed(summary) = &outcome {
        tracing::info!(
            "Done: {} of {} asset(s) updated",
            summary.updated(),
            summary.total()
        );
    }

    Ok(if is_failure(&outcome, args.strict) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use termsync_connect::{CommitOutcome, CommitStatus, CommitSummary};

    fn summary(status: CommitStatus) -> CommitSummary {
        CommitSummary::new(vec![CommitOutcome {
            asset_id: "a1".to_string(),
            asset_codename: "photo".to_string(),
            status,
            error: None,
        }])
    }

    #[test]
    fn test_partial_failure_only_fails_when_strict() {
        let failed = RunOutcome::Committed(summary(CommitStatus::Failed));
        assert!(!is_failure(&failed, false));
        assert!(is_failure(&failed, true));

        let updated = RunOutcome::Committed(summary(CommitStatus::Updated));
        assert!(!is_failure(&updated, true));
    }

    #[test]
    fn test_abort_and_nothing_to_do_succeed() {
        assert!(!is_failure(&RunOutcome::Aborted, true));
        assert!(!is_failure(&RunOutcome::NothingToDo, true));
    }
}
