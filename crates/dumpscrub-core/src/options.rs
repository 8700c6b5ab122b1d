//! Configuration for the normalizer.

use crate::error::NormalizeError;
use crate::scanner::is_identifier_byte;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Schema used by pg_dump for objects that live in the default namespace.
pub const DEFAULT_SCHEMA: &str = "public";

/// Meta-commands pg_dump (17.6 and later) wraps around its output.
pub const DEFAULT_META_COMMANDS: &[&str] = &["restrict", "unrestrict"];

/// Options controlling which rewrites the normalizer applies.
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeOptions {
    /// Backslash meta-command keywords (without the backslash) whose lines
    /// are dropped. Lines using any other keyword are kept and reported.
    #[serde(default = "default_meta_commands")]
    pub meta_commands: Vec<String>,

    /// Schema written into an empty `set_config('search_path', ...)` call.
    /// `null` disables the fix.
    #[serde(default = "default_schema")]
    pub search_path_schema: Option<String>,

    /// Schema qualifier stripped from identifiers outside literals.
    /// `null` disables stripping.
    #[serde(default = "default_schema")]
    pub strip_qualifier: Option<String>,

    /// Fail instead of warning when a quote is still open at end of input.
    #[serde(default)]
    pub strict: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            meta_commands: default_meta_commands(),
            search_path_schema: default_schema(),
            strip_qualifier: default_schema(),
            strict: false,
        }
    }
}

fn default_meta_commands() -> Vec<String> {
    DEFAULT_META_COMMANDS.iter().map(|s| s.to_string()).collect()
}

fn default_schema() -> Option<String> {
    Some(DEFAULT_SCHEMA.to_string())
}

impl NormalizeOptions {
    /// Checks that every configured name can be matched and emitted safely.
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if let Some(schema) = &self.search_path_schema {
            validate_schema_name("searchPathSchema", schema)?;
        }
        if let Some(qualifier) = &self.strip_qualifier {
            validate_schema_name("stripQualifier", qualifier)?;
        }
        for keyword in &self.meta_commands {
            if keyword.is_empty() {
                return Err(NormalizeError::invalid_option(
                    "metaCommands",
                    "keywords must not be empty",
                ));
            }
            if !keyword
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_')
            {
                return Err(NormalizeError::invalid_option(
                    "metaCommands",
                    format!("`{keyword}` is not a plain keyword (write it without the backslash)"),
                ));
            }
        }
        Ok(())
    }

    /// Returns true if `keyword` names a meta-command whose lines are dropped.
    pub fn is_meta_command(&self, keyword: &[u8]) -> bool {
        self.meta_commands
            .iter()
            .any(|known| known.as_bytes() == keyword)
    }
}

fn validate_schema_name(field: &'static str, name: &str) -> Result<(), NormalizeError> {
    let bytes = name.as_bytes();
    match bytes.first() {
        None => Err(NormalizeError::invalid_option(field, "must not be empty")),
        Some(&first) if first.is_ascii_digit() || first == b'$' => {
            let reason = format!("`{name}` must not start with `{}`", first as char);
            Err(NormalizeError::invalid_option(field, reason))
        }
        Some(_) if !bytes.iter().copied().all(is_identifier_byte) => {
            let reason = format!("`{name}` is not an unquoted identifier");
            Err(NormalizeError::invalid_option(field, reason))
        }
        Some(_) => Ok(()),
    }
}
