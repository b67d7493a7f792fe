//! Writes the HTML report and opens it in the platform viewer.

use std::path::{Path, PathBuf};
use std::process::Command;

use termsync_connect::{ReportPublisher, SyncPlan};
use termsync_core::config::Config;
use termsync_core::errors::Result;
use termsync_core::report::{write_report, ReportLinks, ReportRenderer};

pub struct HtmlReportPublisher {
    renderer: ReportRenderer,
    links: ReportLinks,
    results_dir: PathBuf,
    open_viewer: bool,
}

impl HtmlReportPublisher {
    pub fn new(config: &Config, open_viewer: bool) -> Result<Self> {
        Ok(Self {
            renderer: ReportRenderer::new()?,
            links: ReportLinks::from_config(config),
            results_dir: config.results_dir.clone(),
            open_viewer,
        })
    }
}

impl ReportPublisher for HtmlReportPublisher {
    fn publish(&self, plan: &SyncPlan) -> Result<PathBuf> {
        let html = self.renderer.render(&plan.rows, &self.links)?;
        let path = write_report(&self.results_dir, &html)?;

        if self.open_viewer {
            if let Err(e) = open_in_viewer(&path) {
                tracing::warn!("Could not open {} in a viewer: {}", path.display(), e);
            }
        }

        Ok(path)
    }
}

fn open_in_viewer(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(path);
        c
    };

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    // The viewer outlives this process; the child is not awaited.
    command.spawn().map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termsync_core::constants::REPORT_FILE_NAME;
    use termsync_core::remap::RemapOutcome;

    #[test]
    fn test_publish_writes_report_without_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let results_dir = dir.path().join("results");
        let config = Config::from_lookup(|key| match key {
            "SOURCE_ENV_ID" => Some("src".to_string()),
            "SOURCE_API_KEY" => Some("k1".to_string()),
            "TARGET_ENV_ID" => Some("tgt".to_string()),
            "TARGET_API_KEY" => Some("k2".to_string()),
            _ => None,
        })
        .unwrap()
        .with_results_dir(&results_dir);

        let publisher = HtmlReportPublisher::new(&config, false).unwrap();
        let plan = SyncPlan::new("src", "tgt", RemapOutcome::default());
        let path = publisher.publish(&plan).unwrap();

        assert_eq!(path, results_dir.join(REPORT_FILE_NAME));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("No assets need updating."));
    }
}
