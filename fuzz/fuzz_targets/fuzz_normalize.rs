//! Fuzz target for the normalizer.
//!
//! Checks that `normalize_with_options()` never panics and that its output is
//! a fixed point for lenient options.

#![no_main]

use arbitrary::Arbitrary;
use dumpscrub_core::{normalize_with_options, NormalizeOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    sql: Vec<u8>,
    strip_qualifier: bool,
    fix_search_path: bool,
    strict: bool,
}

impl FuzzInput {
    fn options(&self) -> NormalizeOptions {
        let defaults = NormalizeOptions::default();
        NormalizeOptions {
            search_path_schema: defaults.search_path_schema.filter(|_| self.fix_search_path),
            strip_qualifier: defaults.strip_qualifier.filter(|_| self.strip_qualifier),
            strict: self.strict,
            ..defaults
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let options = input.options();
    let Ok(outcome) = normalize_with_options(&input.sql, &options) else {
        return;
    };

    if !options.strict {
        let again = normalize_with_options(&outcome.sql, &options)
            .expect("lenient normalization cannot fail");
        assert_eq!(again.sql, outcome.sql, "normalization is not idempotent");
    }
});
