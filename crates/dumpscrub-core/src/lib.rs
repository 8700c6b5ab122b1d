//! Normalizer for SQL schema dumps.
//!
//! Schema dumps (typically `pg_dump --schema-only`) carry noise that breaks
//! code generators and makes diffs churn: version banners, `\restrict`
//! guards, an empty `search_path` and `public.` on every identifier. This
//! crate removes it with a single byte-oriented pass that knows enough SQL to
//! leave string literals, quoted identifiers and comments alone.
//!
//! The normalizer is a pure function: no I/O, no global state, no database.

pub mod error;
pub mod normalizer;
pub mod options;
pub mod preamble;
pub mod scanner;
pub mod types;

mod rewrite;

// Re-export main types and functions
pub use error::{NormalizeError, Position};
pub use normalizer::{normalize, normalize_with_options};
pub use options::{NormalizeOptions, DEFAULT_META_COMMANDS, DEFAULT_SCHEMA};
pub use preamble::{strip_leading_noise, LeadingNoise};
pub use types::{issue_codes, Issue, NormalizeOutcome, RewriteCounts, Severity};
