//! Error types for dump normalization.
//!
//! # Error Handling Strategy
//!
//! This crate uses two complementary error handling patterns:
//!
//! - [`NormalizeError`]: Fatal errors that prevent normalization. Returned as
//!   `Result<T, NormalizeError>`; no partial output is produced.
//!
//! - [`crate::types::Issue`]: Non-fatal warnings collected during the scan
//!   (e.g., an unterminated string literal, an unrecognized meta-command).
//!   These are returned alongside the normalized buffer so callers can decide
//!   whether the output is trustworthy.
//!
//! Dump tools are expected to emit well-formed SQL, so the scanner is lenient
//! by default. Setting [`crate::NormalizeOptions::strict`] promotes the
//! unterminated-quote warnings to errors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while normalizing a SQL buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A configuration value cannot be used by the scanner.
    #[error("invalid option `{field}`: {reason}")]
    InvalidOptions {
        /// Name of the offending option (camelCase, as in the config file).
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// A single-quoted literal was still open at end of input.
    #[error("unterminated string literal starting at {position}")]
    UnterminatedLiteral {
        /// Where the opening quote was found.
        position: Position,
    },

    /// A double-quoted identifier was still open at end of input.
    #[error("unterminated quoted identifier starting at {position}")]
    UnterminatedQuotedIdentifier {
        /// Where the opening quote was found.
        position: Position,
    },
}

impl NormalizeError {
    pub(crate) fn invalid_option(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            field,
            reason: reason.into(),
        }
    }
}

/// Position of a byte in the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, counted in bytes).
    pub column: usize,
}

impl Position {
    /// Computes the line and column of `offset` within `input`.
    ///
    /// Offsets past the end are clamped to the end of the buffer.
    pub fn at(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |idx| idx + 1);

        Self {
            line,
            column: offset - line_start + 1,
        }
    }
}

/// Resolves byte offsets to [`Position`]s in a single forward pass.
///
/// Offsets are expected in non-decreasing order; each call only scans the
/// bytes since the previous one. An earlier offset restarts from the top.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PositionTracker {
    offset: usize,
    line: usize,
    line_start: usize,
}

impl PositionTracker {
    pub fn position(&mut self, input: &[u8], offset: usize) -> Position {
        let offset = offset.min(input.len());
        if offset < self.offset {
            *self = Self::default();
        }

        for (idx, &b) in input[self.offset..offset].iter().enumerate() {
            if b == b'\n' {
                self.line += 1;
                self.line_start = self.offset + idx + 1;
            }
        }
        self.offset = offset;

        Position {
            line: self.line + 1,
            column: offset - self.line_start + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
