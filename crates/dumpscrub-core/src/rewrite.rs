//! Literal-aware rewriting of the statement body.
//!
//! A single left-to-right pass drives the [`Mode`] state machine over the
//! input. Rewrites are only attempted in [`Mode::Plain`], so text inside
//! string literals, quoted identifiers and comments is always copied through
//! byte for byte, even when it looks exactly like something we rewrite
//! elsewhere (`'https://public.example.com'`).

use crate::error::{NormalizeError, PositionTracker};
use crate::options::NormalizeOptions;
use crate::scanner::{
    at_identifier_boundary, is_identifier_byte, line_end, meta_command_keyword,
    trim_line_terminator, Mode,
};
use crate::types::{issue_codes, Issue, RewriteCounts};
use bstr::ByteSlice;
use regex::bytes::Regex;
use std::sync::OnceLock;

/// Matches the empty search path pg_dump sets before its DDL, capturing the
/// `''` argument. Anchored: only tried at the cursor.
fn search_path_call() -> &'static Regex {
    static SEARCH_PATH_CALL: OnceLock<Regex> = OnceLock::new();
    SEARCH_PATH_CALL.get_or_init(|| {
        Regex::new(
            r"(?i-u)\A(?:pg_catalog\s*\.\s*)?set_config\s*\(\s*'search_path'\s*,\s*('')\s*,\s*(?:true|false)\s*\)",
        )
        .expect("Invalid regex pattern")
    })
}

/// Everything the rewrite pass produced.
#[derive(Debug)]
pub(crate) struct Rewritten {
    pub sql: Vec<u8>,
    pub counts: RewriteCounts,
    pub issues: Vec<Issue>,
}

pub(crate) struct Rewriter<'a> {
    /// The whole original buffer; offsets and positions refer to it.
    input: &'a [u8],
    options: &'a NormalizeOptions,
    /// `<qualifier>.`, precomputed.
    qualifier_prefix: Option<Vec<u8>>,
    pos: usize,
    mode: Mode,
    /// Offset of the quote or comment opener that started the current mode.
    opened_at: usize,
    positions: PositionTracker,
    out: Vec<u8>,
    counts: RewriteCounts,
    issues: Vec<Issue>,
}

impl<'a> Rewriter<'a> {
    /// Creates a rewriter that starts scanning at `start`, which must be the
    /// beginning of a line.
    pub fn new(input: &'a [u8], start: usize, options: &'a NormalizeOptions) -> Self {
        let qualifier_prefix = options.strip_qualifier.as_ref().map(|qualifier| {
            let mut prefix = Vec::with_capacity(qualifier.len() + 1);
            prefix.extend_from_slice(qualifier.as_bytes());
            prefix.push(b'.');
            prefix
        });

        Self {
            input,
            options,
            qualifier_prefix,
            pos: start,
            mode: Mode::LineStart,
            opened_at: start,
            positions: PositionTracker::default(),
            out: Vec::with_capacity(input.len() - start),
            counts: RewriteCounts::default(),
            issues: Vec::new(),
        }
    }

    pub fn run(mut self) -> Result<Rewritten, NormalizeError> {
        while self.pos < self.input.len() {
            match self.mode {
                Mode::LineStart => self.line_start(),
                Mode::Plain => self.plain(),
                Mode::LineComment => self.line_comment(),
                Mode::BlockComment { depth } => self.block_comment(depth),
                Mode::Literal => self.quoted(b'\''),
                Mode::QuotedIdentifier => self.quoted(b'"'),
            }
        }
        self.finish()
    }

    /// Copies `len` bytes from the cursor to the output.
    fn copy(&mut self, len: usize) {
        let end = (self.pos + len).min(self.input.len());
        self.out.extend_from_slice(&self.input[self.pos..end]);
        self.pos = end;
    }

    fn line_start(&mut self) {
        let end = line_end(self.input, self.pos);
        let line = trim_line_terminator(&self.input[self.pos..end]);

        if let Some(keyword) = meta_command_keyword(line) {
            if self.options.is_meta_command(keyword) {
                self.counts.meta_commands_removed += 1;
                self.pos = end;
                return;
            }
            self.issues.push(
                Issue::warning(
                    issue_codes::UNRECOGNIZED_META_COMMAND,
                    format!(
                        "unrecognized meta-command `\\{}` left in place",
                        keyword.as_bstr()
                    ),
                )
                .with_position(self.positions.position(self.input, self.pos)),
            );
        }

        self.mode = Mode::Plain;
    }

    fn plain(&mut self) {
        let next = self.input.get(self.pos + 1).copied();

        match self.input[self.pos] {
            b'\n' => {
                self.copy(1);
                self.mode = Mode::LineStart;
            }
            b'\'' => {
                self.opened_at = self.pos;
                self.copy(1);
                self.mode = Mode::Literal;
            }
            b'"' => {
                self.opened_at = self.pos;
                self.copy(1);
                self.mode = Mode::QuotedIdentifier;
            }
            b'-' if next == Some(b'-') => {
                self.copy(2);
                self.mode = Mode::LineComment;
            }
            b'/' if next == Some(b'*') => {
                self.opened_at = self.pos;
                self.copy(2);
                self.mode = Mode::BlockComment { depth: 1 };
            }
            _ => {
                if !self.fix_search_path() && !self.strip_qualifier() {
                    self.copy(1);
                }
            }
        }
    }

    /// Rewrites `set_config('search_path', '', ...)` at the cursor.
    fn fix_search_path(&mut self) -> bool {
        let Some(schema) = self.options.search_path_schema.as_deref() else {
            return false;
        };
        if !matches!(self.input[self.pos].to_ascii_lowercase(), b'p' | b's')
            || !at_identifier_boundary(self.input, self.pos)
        {
            return false;
        }

        let rest = &self.input[self.pos..];
        let Some(captures) = search_path_call().captures(rest) else {
            return false;
        };
        let (Some(call), Some(value)) = (captures.get(0), captures.get(1)) else {
            return false;
        };

        self.out.extend_from_slice(&rest[..value.start()]);
        self.out.push(b'\'');
        self.out.extend_from_slice(schema.as_bytes());
        self.out.push(b'\'');
        self.out.extend_from_slice(&rest[value.end()..call.end()]);
        self.pos += call.end();
        self.counts.search_path_fixes += 1;
        true
    }

    /// Drops `<qualifier>.` at the cursor when it prefixes an identifier.
    fn strip_qualifier(&mut self) -> bool {
        let Some(prefix) = self.qualifier_prefix.as_deref() else {
            return false;
        };
        let rest = &self.input[self.pos..];
        if !rest.starts_with(prefix) || !at_identifier_boundary(self.input, self.pos) {
            return false;
        }
        match rest.get(prefix.len()) {
            Some(&b) if is_identifier_byte(b) || b == b'"' => {}
            _ => return false,
        }

        self.pos += prefix.len();
        self.counts.qualifiers_stripped += 1;
        true
    }

    fn line_comment(&mut self) {
        let end = line_end(self.input, self.pos);
        self.copy(end - self.pos);
        self.mode = Mode::LineStart;
    }

    fn block_comment(&mut self, depth: usize) {
        let rest = &self.input[self.pos..];
        let Some(idx) = rest.windows(2).position(|w| w == b"/*" || w == b"*/") else {
            self.copy(rest.len());
            return;
        };

        let opens = rest[idx] == b'/';
        self.copy(idx + 2);
        self.mode = match (opens, depth) {
            (true, _) => Mode::BlockComment { depth: depth + 1 },
            (false, 1) => Mode::Plain,
            (false, _) => Mode::BlockComment { depth: depth - 1 },
        };
    }

    /// Copies through the body of a quoted literal or identifier. A doubled
    /// quote is an escaped quote and keeps the quote open.
    fn quoted(&mut self, quote: u8) {
        let rest = &self.input[self.pos..];
        let Some(idx) = rest.iter().position(|&b| b == quote) else {
            self.copy(rest.len());
            return;
        };

        if rest.get(idx + 1) == Some(&quote) {
            self.copy(idx + 2);
        } else {
            self.copy(idx + 1);
            self.mode = Mode::Plain;
        }
    }

    fn finish(mut self) -> Result<Rewritten, NormalizeError> {
        let position = self.positions.position(self.input, self.opened_at);

        match self.mode {
            Mode::Literal if self.options.strict => {
                return Err(NormalizeError::UnterminatedLiteral { position });
            }
            Mode::QuotedIdentifier if self.options.strict => {
                return Err(NormalizeError::UnterminatedQuotedIdentifier { position });
            }
            Mode::Literal => self.issues.push(
                Issue::warning(
                    issue_codes::UNTERMINATED_STRING_LITERAL,
                    "string literal is never closed; it runs to the end of input",
                )
                .with_position(position),
            ),
            Mode::QuotedIdentifier => self.issues.push(
                Issue::warning(
                    issue_codes::UNTERMINATED_QUOTED_IDENTIFIER,
                    "quoted identifier is never closed; it runs to the end of input",
                )
                .with_position(position),
            ),
            Mode::BlockComment { .. } => self.issues.push(
                Issue::info(
                    issue_codes::UNTERMINATED_BLOCK_COMMENT,
                    "block comment is never closed; it runs to the end of input",
                )
                .with_position(position),
            ),
            Mode::LineStart | Mode::Plain | Mode::LineComment => {}
        }

        Ok(Rewritten {
            sql: self.out,
            counts: self.counts,
            issues: self.issues,
        })
    }
}
