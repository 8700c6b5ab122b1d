//! The normalization pipeline: strip the preamble, then rewrite the body.

use crate::error::NormalizeError;
use crate::options::NormalizeOptions;
use crate::preamble::strip_leading_noise;
use crate::rewrite::Rewriter;
use crate::types::NormalizeOutcome;
#[cfg(feature = "tracing")]
use tracing::{debug, debug_span, trace};

/// Normalizes a schema dump with the default options.
///
/// Strips the leading comment/meta-command preamble, restores an empty
/// `search_path` to `public` and removes `public.` qualifiers outside string
/// literals. Warnings are discarded; use [`normalize_with_options`] to see
/// them.
///
/// # Example
///
/// ```
/// let out = dumpscrub_core::normalize(b"-- dump\n\nCREATE TABLE public.t ();\n").unwrap();
/// assert_eq!(out, b"CREATE TABLE t ();\n");
/// ```
pub fn normalize(input: &[u8]) -> Result<Vec<u8>, NormalizeError> {
    normalize_with_options(input, &NormalizeOptions::default()).map(|outcome| outcome.sql)
}

/// Normalizes a schema dump.
///
/// The input is never modified; a new buffer is returned together with the
/// number of rewrites applied and any issues noticed along the way.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidOptions`] when `options` fail
/// validation, and an unterminated-quote error when `options.strict` is set
/// and a literal or quoted identifier is still open at end of input.
pub fn normalize_with_options(
    input: &[u8],
    options: &NormalizeOptions,
) -> Result<NormalizeOutcome, NormalizeError> {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("normalize", input_len = input.len()).entered();

    options.validate()?;

    let noise = strip_leading_noise(input, options);
    #[cfg(feature = "tracing")]
    trace!(
        offset = noise.offset,
        lines = noise.lines,
        "stripped leading noise"
    );

    let rewritten = Rewriter::new(input, noise.offset, options).run()?;

    let mut counts = rewritten.counts;
    counts.leading_lines_stripped = noise.lines;
    let changed = rewritten.sql.as_slice() != input;

    #[cfg(feature = "tracing")]
    {
        for issue in &rewritten.issues {
            trace!(code = %issue.code, message = %issue.message, "normalization issue");
        }
        debug!(
            leading_lines = counts.leading_lines_stripped,
            meta_commands = counts.meta_commands_removed,
            search_path_fixes = counts.search_path_fixes,
            qualifiers = counts.qualifiers_stripped,
            output_len = rewritten.sql.len(),
            "normalized dump"
        );
    }

    Ok(NormalizeOutcome {
        sql: rewritten.sql,
        counts,
        issues: rewritten.issues,
        changed,
    })
}
