//! Result types returned by the normalizer.

use crate::error::Position;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A non-fatal condition noticed while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Severity level
    pub severity: Severity,

    /// Machine-readable issue code (see [`issue_codes`])
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Optional: location in the original input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Issue {
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            position: None,
        }
    }

    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code: code.into(),
            message: message.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

/// Machine-readable issue codes.
pub mod issue_codes {
    pub const UNTERMINATED_STRING_LITERAL: &str = "UNTERMINATED_STRING_LITERAL";
    pub const UNTERMINATED_QUOTED_IDENTIFIER: &str = "UNTERMINATED_QUOTED_IDENTIFIER";
    pub const UNTERMINATED_BLOCK_COMMENT: &str = "UNTERMINATED_BLOCK_COMMENT";
    pub const UNRECOGNIZED_META_COMMAND: &str = "UNRECOGNIZED_META_COMMAND";
}

/// How many rewrites of each kind a normalization applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewriteCounts {
    /// Blank, comment and meta-command lines dropped from the front.
    pub leading_lines_stripped: usize,
    /// Meta-command lines dropped after the first real statement.
    pub meta_commands_removed: usize,
    /// `set_config('search_path', '', ...)` calls rewritten.
    pub search_path_fixes: usize,
    /// Schema qualifier prefixes removed.
    pub qualifiers_stripped: usize,
}

impl RewriteCounts {
    pub fn total(self) -> usize {
        self.leading_lines_stripped
            + self.meta_commands_removed
            + self.search_path_fixes
            + self.qualifiers_stripped
    }
}

/// Output of [`crate::normalize_with_options`].
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    /// The normalized SQL bytes.
    pub sql: Vec<u8>,
    pub counts: RewriteCounts,
    pub issues: Vec<Issue>,
    /// True when `sql` differs from the input.
    pub changed: bool,
}

impl NormalizeOutcome {
    /// Returns true if any warning-level issue was recorded.
    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == Severity::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_total() {
        let counts = RewriteCounts {
            leading_lines_stripped: 3,
            meta_commands_removed: 1,
            search_path_fixes: 1,
            qualifiers_stripped: 4,
        };
        assert_eq!(counts.total(), 9);
        assert_eq!(RewriteCounts::default().total(), 0);
    }

    #[test]
    fn test_issue_serialization_skips_missing_position() {
        let issue = Issue::warning(issue_codes::UNRECOGNIZED_META_COMMAND, "unknown");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["code"], "UNRECOGNIZED_META_COMMAND");
        assert!(json.get("position").is_none());
    }

    #[test]
    fn test_issue_with_position() {
        let issue = Issue::info("X", "y").with_position(Position { line: 2, column: 5 });
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["position"]["line"], 2);
        assert_eq!(json["position"]["column"], 5);
    }
}
