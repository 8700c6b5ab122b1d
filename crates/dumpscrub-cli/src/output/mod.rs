//! Output formatting modules.

pub mod report;

pub use report::{format_json_report, format_text_report, FileReport};
