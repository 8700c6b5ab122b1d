//! Human-readable and JSON summaries of a normalization run.

use dumpscrub_core::{Issue, RewriteCounts, Severity};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write;

/// Per-file result used by the formatters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub name: String,
    pub changed: bool,
    pub counts: RewriteCounts,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
    /// Set when normalization failed for this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Format the report as text, one block per file plus a totals line.
pub fn format_text_report(reports: &[FileReport], colored: bool) -> String {
    let mut out = String::new();
    let mut totals = RewriteCounts::default();
    let mut failed = 0usize;

    for report in reports {
        write_file_section(&mut out, report, colored);

        if report.error.is_some() {
            failed += 1;
        }
        totals.leading_lines_stripped += report.counts.leading_lines_stripped;
        totals.meta_commands_removed += report.counts.meta_commands_removed;
        totals.search_path_fixes += report.counts.search_path_fixes;
        totals.qualifiers_stripped += report.counts.qualifiers_stripped;
    }

    let summary = format!(
        "{} files | {} failed | {} rewrites",
        reports.len(),
        failed,
        totals.total()
    );
    if colored {
        writeln!(out, "{}", summary.cyan()).unwrap();
    } else {
        writeln!(out, "{summary}").unwrap();
    }

    out
}

fn write_file_section(out: &mut String, report: &FileReport, colored: bool) {
    let status = match (&report.error, report.changed) {
        (Some(_), _) => "FAIL",
        (None, true) => "FIXED",
        (None, false) => "CLEAN",
    };

    if colored {
        let status = match status {
            "FAIL" => status.red().bold().to_string(),
            "FIXED" => status.yellow().to_string(),
            _ => status.green().to_string(),
        };
        writeln!(out, "== [{}] {}", report.name.bold(), status).unwrap();
    } else {
        writeln!(out, "== [{}] {status}", report.name).unwrap();
    }

    if let Some(error) = &report.error {
        writeln!(out, "   error: {error}").unwrap();
        return;
    }

    let counts = &report.counts;
    writeln!(
        out,
        "   leading lines: {} | meta-commands: {} | search_path fixes: {} | qualifiers: {}",
        counts.leading_lines_stripped,
        counts.meta_commands_removed,
        counts.search_path_fixes,
        counts.qualifiers_stripped
    )
    .unwrap();

    for issue in &report.issues {
        let location = issue
            .position
            .map(|p| format!("L:{:>4} | P:{:>4} | ", p.line, p.column))
            .unwrap_or_default();
        let severity = match issue.severity {
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        writeln!(out, "   {location}{} | {severity}: {}", issue.code, issue.message).unwrap();
    }
}

/// Format the report as JSON.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json_report(reports: &[FileReport], compact: bool) -> String {
    if compact {
        serde_json::to_string(reports).expect("serialization cannot fail")
    } else {
        serde_json::to_string_pretty(reports).expect("serialization cannot fail")
    }
}
