//! Leading-noise stripping.
//!
//! Schema dumps start with host-specific chatter: version banners, blank
//! lines and `\restrict` guards. None of it is SQL a consumer cares about,
//! and it changes on every dump, so everything before the first real line
//! is dropped. Only whole lines are ever removed, and only from the front.

use crate::options::NormalizeOptions;
use crate::scanner::{classify_line, trim_line_terminator, LineKind};
use bstr::ByteSlice;

/// Where the first real line starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingNoise {
    /// Byte offset of the first line to keep (`input.len()` if none).
    pub offset: usize,
    /// Number of lines dropped.
    pub lines: usize,
}

/// Finds the run of blank, comment and meta-command lines at the start of
/// `input`.
///
/// Blank lines between leading comments do not end the run. The first line
/// of any other kind ends it for good: comments further down are kept.
pub fn strip_leading_noise(input: &[u8], options: &NormalizeOptions) -> LeadingNoise {
    let mut offset = 0;
    let mut lines = 0;

    for line in input.lines_with_terminator() {
        match classify_line(trim_line_terminator(line), options) {
            LineKind::Blank | LineKind::Comment | LineKind::MetaCommand => {
                offset += line.len();
                lines += 1;
            }
            LineKind::Code => break,
        }
    }

    LeadingNoise { offset, lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(input: &str) -> &str {
        let noise = strip_leading_noise(input.as_bytes(), &NormalizeOptions::default());
        &input[noise.offset..]
    }

    #[test]
    fn test_strips_comments_and_blank_lines() {
        let input = "--\n-- foo\n\n-- bar\n\nreal stuff\n-- end\n";
        assert_eq!(strip(input), "real stuff\n-- end\n");
    }

    #[test]
    fn test_counts_stripped_lines() {
        let noise =
            strip_leading_noise(b"--\n-- foo\n\nSELECT 1;\n", &NormalizeOptions::default());
        assert_eq!(noise, LeadingNoise { offset: 11, lines: 3 });
    }

    #[test]
    fn test_strips_meta_commands() {
        let input = "\\restrict abc123\n-- comment\nreal stuff\n\\unrestrict abc123\n";
        assert_eq!(strip(input), "real stuff\n\\unrestrict abc123\n");
    }

    #[test]
    fn test_only_noise_yields_empty() {
        assert_eq!(strip("-- a\n\n\\restrict x\n   \n-- b"), "");
        assert_eq!(strip(""), "");
    }

    #[test]
    fn test_no_noise_is_untouched() {
        assert_eq!(strip("SELECT 1;\n-- trailing\n"), "SELECT 1;\n-- trailing\n");
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(strip("-- a\r\n\r\nSELECT 1;\r\n"), "SELECT 1;\r\n");
    }

    #[test]
    fn test_unknown_meta_command_ends_preamble() {
        assert_eq!(strip("-- a\n\\connect db\nSELECT 1;\n"), "\\connect db\nSELECT 1;\n");
    }

    #[test]
    fn test_custom_meta_commands() {
        let options = NormalizeOptions {
            meta_commands: vec!["connect".to_string()],
            ..Default::default()
        };
        let input = b"\\connect db\n\\restrict x\n";
        let noise = strip_leading_noise(input, &options);
        assert_eq!(&input[noise.offset..], b"\\restrict x\n");
    }

    #[test]
    fn test_invalid_utf8_is_processed_bytewise() {
        let input = b"-- \xff\xfe banner\n\xffSELECT 1;\n";
        let noise = strip_leading_noise(input, &NormalizeOptions::default());
        assert_eq!(&input[noise.offset..], b"\xffSELECT 1;\n");
    }
}
