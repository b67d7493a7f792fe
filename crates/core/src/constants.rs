/// Default base URL of the content management API
pub const DEFAULT_API_BASE_URL: &str = "https://manage.kontent.ai/v2";

/// Default base URL of the web app, used for report deep links
pub const DEFAULT_APP_BASE_URL: &str = "https://app.kontent.ai";

/// Directory the HTML report is written to
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Report file name, overwritten on every run
pub const REPORT_FILE_NAME: &str = "taxonomy-sync-report.html";

/// Asset updates in flight at once during commit
pub const DEFAULT_COMMIT_CONCURRENCY: usize = 1;

// Environment variable names
pub const SOURCE_ENV_ID_KEY: &str = "SOURCE_ENV_ID";
pub const SOURCE_API_KEY_KEY: &str = "SOURCE_API_KEY";
pub const TARGET_ENV_ID_KEY: &str = "TARGET_ENV_ID";
pub const TARGET_API_KEY_KEY: &str = "TARGET_API_KEY";
pub const API_BASE_URL_KEY: &str = "TERMSYNC_API_BASE_URL";
pub const APP_BASE_URL_KEY: &str = "TERMSYNC_APP_BASE_URL";
pub const RESULTS_DIR_KEY: &str = "TERMSYNC_RESULTS_DIR";
pub const COMMIT_CONCURRENCY_KEY: &str = "TERMSYNC_COMMIT_CONCURRENCY";
pub const LOG_FORMAT_KEY: &str = "TERMSYNC_LOG_FORMAT";
