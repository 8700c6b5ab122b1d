//! Builds normalizer options from a config file and command-line flags.

use crate::cli::Args;
use anyhow::{Context, Result};
use dumpscrub_core::NormalizeOptions;
use std::path::Path;

/// Resolve the effective options: defaults, then the config file, then flags.
pub fn resolve_options(args: &Args) -> Result<NormalizeOptions> {
    let mut options = match &args.config {
        Some(path) => read_config_file(path)?,
        None => NormalizeOptions::default(),
    };

    if let Some(schema) = &args.search_path_schema {
        options.search_path_schema = Some(schema.clone());
    }
    if args.no_search_path_fix {
        options.search_path_schema = None;
    }
    if let Some(qualifier) = &args.qualifier {
        options.strip_qualifier = Some(qualifier.clone());
    }
    if args.keep_qualifier {
        options.strip_qualifier = None;
    }
    if !args.meta_commands.is_empty() {
        options.meta_commands = args.meta_commands.clone();
    }
    if args.strict {
        options.strict = true;
    }

    options.validate().context("Invalid normalizer options")?;
    Ok(options)
}

/// Read `NormalizeOptions` from a JSON file.
fn read_config_file(path: &Path) -> Result<NormalizeOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
