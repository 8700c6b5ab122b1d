//! dumpscrub CLI - SQL schema dump normalizer

use dumpscrub_cli::cli;
use dumpscrub_cli::config::resolve_options;
use dumpscrub_cli::input::{self, DumpSource};
use dumpscrub_cli::output;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dumpscrub_core::{normalize_with_options, Issue, NormalizeOptions, Severity};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use cli::{Args, ReportFormat};
use output::{format_json_report, format_text_report, FileReport};

/// At least one input could not be normalized.
const EXIT_FAILURE: u8 = 1;
/// Configuration or I/O error (bad options, unreadable input, unwritable output).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(has_failures) => {
            if has_failures {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("dumpscrub: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// Normalize every input and write the results.
///
/// Returns `Ok(true)` when at least one input failed to normalize.
fn run(args: Args) -> Result<bool> {
    let options = resolve_options(&args)?;

    if args.output.is_some() && args.files.len() > 1 {
        bail!("--output accepts a single input file; use --in-place for several files");
    }

    let sources = input::read_input(&args.files)?;
    let stderr_colored = io::stderr().is_terminal();

    let mut reports = Vec::with_capacity(sources.len());
    let mut normalized = Vec::new();
    let mut has_failures = false;

    for source in &sources {
        let report = match normalize_source(source, &options) {
            Ok((sql, report)) => {
                if !args.quiet {
                    print_issues(&source.name, &report.issues, stderr_colored);
                }

                if args.in_place {
                    if report.changed {
                        write_in_place(source.path.as_ref(), &sql)?;
                    }
                } else {
                    normalized.extend_from_slice(&sql);
                }
                report
            }
            Err(report) => {
                has_failures = true;
                if let Some(error) = &report.error {
                    eprintln!("dumpscrub: error: {}: {error}", source.name);
                }
                report
            }
        };
        reports.push(report);
    }

    // Output is only written when every input normalized.
    if !args.in_place && !has_failures {
        write_output(&args.output, &normalized)?;
    }

    if let Some(format) = args.report {
        let rendered = match format {
            ReportFormat::Text => format_text_report(&reports, stderr_colored),
            ReportFormat::Json => format_json_report(&reports, args.compact),
        };
        eprint!("{rendered}");
        if !rendered.ends_with('\n') {
            eprintln!();
        }
    }

    Ok(has_failures)
}

/// Normalize one dump, returning the rewritten bytes and its report, or a
/// report carrying the error.
fn normalize_source(
    source: &DumpSource,
    options: &NormalizeOptions,
) -> std::result::Result<(Vec<u8>, FileReport), FileReport> {
    match normalize_with_options(&source.content, options) {
        Ok(outcome) => {
            let report = FileReport {
                name: source.name.clone(),
                changed: outcome.changed,
                counts: outcome.counts,
                issues: outcome.issues,
                error: None,
            };
            Ok((outcome.sql, report))
        }
        Err(err) => Err(FileReport {
            name: source.name.clone(),
            changed: false,
            counts: Default::default(),
            issues: Vec::new(),
            error: Some(err.to_string()),
        }),
    }
}

fn print_issues(name: &str, issues: &[Issue], colored: bool) {
    for issue in issues {
        let label = match issue.severity {
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        let label = if colored {
            match issue.severity {
                Severity::Warning => label.yellow().to_string(),
                Severity::Info => label.cyan().to_string(),
            }
        } else {
            label.to_string()
        };
        let location = issue
            .position
            .map(|p| format!(":{}:{}", p.line, p.column))
            .unwrap_or_default();

        eprintln!("dumpscrub: {label}: {name}{location}: {}", issue.message);
    }
}

fn write_in_place(path: Option<&PathBuf>, content: &[u8]) -> Result<()> {
    let Some(path) = path else {
        bail!("cannot rewrite stdin in place");
    };
    fs::write(path, content).with_context(|| format!("Failed to write to {}", path.display()))
}

fn write_output(path: &Option<PathBuf>, content: &[u8]) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content)
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")?;
    }
    Ok(())
}
