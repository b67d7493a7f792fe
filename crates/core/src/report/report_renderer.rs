//! HTML preview report.
//!
//! Rendering is a pure function of the rows and links. Writing the file is
//! a separate step.

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use log::debug;
use serde::Serialize;

use crate::config::{Config, EnvironmentRole};
use crate::constants::REPORT_FILE_NAME;
use crate::errors::{Error, Result};
use crate::remap::{AssetSummary, ElementDiff, ReportRow};

const REPORT_TEMPLATE_NAME: &str = "report";
const REPORT_TEMPLATE: &str = include_str!("report.hbs");

/// Deep links into the web app for both environments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLinks {
    app_base_url: String,
    source_environment_id: String,
    target_environment_id: String,
}

impl ReportLinks {
    pub fn new(app_base_url: &str, source_environment_id: &str, target_environment_id: &str) -> Self {
        Self {
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
            source_environment_id: source_environment_id.to_string(),
            target_environment_id: target_environment_id.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.app_base_url,
            &config.source.environment_id,
            &config.target.environment_id,
        )
    }

    pub fn environment_id(&self, role: EnvironmentRole) -> &str {
        match role {
            EnvironmentRole::Source => &self.source_environment_id,
            EnvironmentRole::Target => &self.target_environment_id,
        }
    }

    pub fn environment(&self, role: EnvironmentRole) -> String {
        format!("{}/{}", self.app_base_url, self.environment_id(role))
    }

    pub fn asset(&self, role: EnvironmentRole, asset_id: &str) -> String {
        format!(
            "{}/content-inventory/assets/asset/{}",
            self.environment(role),
            asset_id
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvironmentView {
    id: String,
    link: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RowView<'a> {
    source: &'a AssetSummary,
    source_link: String,
    target: &'a AssetSummary,
    target_link: String,
    diffs: &'a [ElementDiff],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportContext<'a> {
    source_environment: EnvironmentView,
    target_environment: EnvironmentView,
    row_count: usize,
    has_rows: bool,
    rows: Vec<RowView<'a>>,
}

/// Renders report rows into a standalone HTML document.
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
}

impl ReportRenderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars
            .register_template_string(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)
            .map_err(|e| Error::Report(e.to_string()))?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, rows: &[ReportRow], links: &ReportLinks) -> Result<String> {
        let environment = |role| EnvironmentView {
            id: links.environment_id(role).to_string(),
            link: links.environment(role),
        };

        let context = ReportContext {
            source_environment: environment(EnvironmentRole::Source),
            target_environment: environment(EnvironmentRole::Target),
            row_count: rows.len(),
            has_rows: !rows.is_empty(),
            rows: rows
                .iter()
                .map(|row| RowView {
                    source: &row.source,
                    source_link: links.asset(EnvironmentRole::Source, &row.source.id),
                    target: &row.target,
                    target_link: links.asset(EnvironmentRole::Target, &row.target.id),
                    diffs: &row.diffs,
                })
                .collect(),
        };

        self.handlebars
            .render(REPORT_TEMPLATE_NAME, &context)
            .map_err(|e| Error::Report(e.to_string()))
    }
}

/// Render the report with a fresh renderer.
pub fn render_report(rows: &[ReportRow], links: &ReportLinks) -> Result<String> {
    ReportRenderer::new()?.render(rows, links)
}

/// Write the report into `dir`, creating it if needed.
///
/// The file name is fixed, so every run overwrites the previous report.
pub fn write_report(dir: &Path, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE_NAME);
    fs::write(&path, html)?;
    debug!("[Report] Wrote {} bytes to {}", html.len(), path.display());
    Ok(path)
}
