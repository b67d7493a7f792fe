use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use termsync_core::config::Config;
use termsync_core::constants::LOG_FORMAT_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "termsync", version)]
#[command(about = "Copy taxonomy term assignments on assets from a source to a target environment")]
pub struct Args {
    /// Directory the HTML report is written to
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Base URL of the management API
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Base URL of the web app, used for links in the report
    #[arg(long)]
    pub app_base_url: Option<String>,

    /// Maximum number of asset updates in flight at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Skip the confirmation prompt and commit
    #[arg(short = 'y', long, conflicts_with = "dry_run")]
    pub yes: bool,

    /// Write the report and stop before committing
    #[arg(long)]
    pub dry_run: bool,

    /// Do not open the report in the default viewer
    #[arg(long)]
    pub no_open: bool,

    /// Exit with status 1 when any asset update fails
    #[arg(long)]
    pub strict: bool,

    /// Log output format (defaults to TERMSYNC_LOG_FORMAT, then text)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Args {
    /// Apply command-line overrides on top of the environment configuration.
    pub fn apply(&self, mut config: Config) -> termsync_core::Result<Config> {
        if let Some(dir) = &self.results_dir {
            config = config.with_results_dir(dir);
        }
        if let Some(url) = &self.api_base_url {
            config = config.with_api_base_url(url);
        }
        if let Some(url) = &self.app_base_url {
            config = config.with_app_base_url(url);
        }
        if let Some(concurrency) = self.concurrency {
            config = config.with_commit_concurrency(concurrency)?;
        }
        Ok(config)
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
            .unwrap_or_else(|| LogFormat::from_env_value(std::env::var(LOG_FORMAT_KEY).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termsync_core::errors::Error;

    fn base_config() -> Config {
        Config::from_lookup(|key| match key {
            "SOURCE_ENV_ID" => Some("src".to_string()),
            "SOURCE_API_KEY" => Some("src-key".to_string()),
            "TARGET_ENV_ID" => Some("tgt".to_string()),
            "TARGET_API_KEY" => Some("tgt-key".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["termsync"]).unwrap();
        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(!args.strict);
        assert!(args.concurrency.is_none());

        let config = args.apply(base_config()).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.api_base_url, "https://manage.kontent.ai/v2");
        assert_eq!(config.commit_concurrency, 1);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let args = Args::try_parse_from([
            "termsync",
            "--results-dir",
            "out",
            "--api-base-url",
            "https://api.example.com",
            "--concurrency",
            "4",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.log_format(), LogFormat::Json);

        let config = args.apply(base_config()).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("out"));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.commit_concurrency, 4);
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let args = Args::try_parse_from(["termsync", "--concurrency", "0"]).unwrap();
        assert!(matches!(
            args.apply(base_config()),
            Err(Error::InvalidConfigValue(_))
        ));
    }

    #[test]
    fn test_yes_conflicts_with_dry_run() {
        assert!(Args::try_parse_from(["termsync", "--yes", "--dry-run"]).is_err());
    }

    #[test]
    fn test_log_format_from_env_value() {
        assert_eq!(LogFormat::from_env_value(None), LogFormat::Text);
        assert_eq!(
            LogFormat::from_env_value(Some(" JSON ".to_string())),
            LogFormat::Json
        );
        assert_eq!(
            LogFormat::from_env_value(Some("pretty".to_string())),
            LogFormat::Text
        );
    }
}
