//! Report module - HTML rendering of the pending changes.

mod report_renderer;

pub use report_renderer::{render_report, write_report, ReportLinks, ReportRenderer};
