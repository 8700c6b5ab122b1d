//! Lexical building blocks shared by the preamble stripper and the rewriter.
//!
//! The scanner understands just enough SQL to tell code apart from comments,
//! string literals and quoted identifiers. It works on raw bytes: only the
//! ASCII markers (`--`, `/*`, `'`, `"`, `\`) carry meaning, everything else
//! is copied through untouched, so invalid UTF-8 never trips it up.

use crate::options::NormalizeOptions;

/// What the byte under the cursor belongs to.
///
/// Exactly one mode is active at any position of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// At the first byte of a line, outside any quote or comment.
    LineStart,
    /// Inside code, outside any quote or comment.
    Plain,
    /// Between `--` and the end of the line.
    LineComment,
    /// Inside `/* ... */`; comments nest, Postgres style.
    BlockComment { depth: usize },
    /// Inside a single-quoted string literal.
    Literal,
    /// Inside a double-quoted identifier.
    QuotedIdentifier,
}

/// Classification of a whole line, used while stripping the preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only.
    Blank,
    /// `--` comment, optionally indented.
    Comment,
    /// A backslash line whose keyword is configured for removal.
    MetaCommand,
    /// Anything else.
    Code,
}

/// Returns true for bytes that may appear inside an unquoted identifier.
///
/// Bytes above 0x7f are treated as identifier bytes, matching Postgres which
/// accepts any non-ASCII letter in identifiers.
pub fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// True when the byte before `pos` cannot continue an identifier.
pub fn at_identifier_boundary(input: &[u8], pos: usize) -> bool {
    pos == 0 || !is_identifier_byte(input[pos - 1])
}

fn is_horizontal_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\x0b' | b'\x0c')
}

/// Strips the line terminator (`\n` or `\r\n`) from a line.
pub fn trim_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Returns the offset one past the end of the line containing `pos`,
/// including its `\n` when present.
pub fn line_end(input: &[u8], pos: usize) -> usize {
    input[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(input.len(), |idx| pos + idx + 1)
}

/// Extracts the keyword of a backslash meta-command line.
///
/// `line` must not contain its terminator. Leading horizontal whitespace is
/// allowed; the keyword runs up to the first whitespace byte. Returns `None`
/// when the line does not start with a backslash.
pub fn meta_command_keyword(line: &[u8]) -> Option<&[u8]> {
    let start = line.iter().position(|&b| !is_horizontal_space(b))?;
    let rest = line[start..].strip_prefix(b"\\")?;
    let end = rest
        .iter()
        .position(|&b| is_horizontal_space(b))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Classifies a single line (without its terminator).
pub fn classify_line(line: &[u8], options: &NormalizeOptions) -> LineKind {
    let content = match line.iter().position(|&b| !is_horizontal_space(b)) {
        Some(start) => &line[start..],
        None => return LineKind::Blank,
    };

    if content.starts_with(b"--") {
        return LineKind::Comment;
    }

    match meta_command_keyword(content) {
        Some(keyword) if options.is_meta_command(keyword) => LineKind::MetaCommand,
        _ => LineKind::Code,
    }
}
