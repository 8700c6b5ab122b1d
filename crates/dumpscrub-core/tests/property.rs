use dumpscrub_core::normalize;
use proptest::prelude::*;

/// Fragments that exercise every scanner mode and every rewrite.
fn fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("public."),
        Just("public.t"),
        Just("x"),
        Just("_"),
        Just(" "),
        Just("\n"),
        Just("\r\n"),
        Just("'"),
        Just("''"),
        Just("\""),
        Just("-"),
        Just("--"),
        Just("/*"),
        Just("*/"),
        Just("\\restrict k"),
        Just("\\unrestrict k"),
        Just("\\connect db"),
        Just("pg_catalog.set_config('search_path', '', false)"),
        Just("SELECT 1;"),
    ]
}

fn noise_line() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(""),
        Just("   "),
        Just("--"),
        Just("-- PostgreSQL database dump"),
        Just("  -- Dumped by pg_dump version 17.6"),
        Just("\\restrict 2fbGdp0bQq"),
        Just("\\unrestrict 2fbGdp0bQq"),
    ]
}

fn normalize_lossy(input: &[u8]) -> Vec<u8> {
    normalize(input).expect("default options never fail")
}

proptest! {
    #[test]
    fn normalize_is_idempotent(fragments in prop::collection::vec(fragment(), 0..40)) {
        let input = fragments.concat();
        let once = normalize_lossy(input.as_bytes());
        let twice = normalize_lossy(&once);
        prop_assert_eq!(
            String::from_utf8_lossy(&twice),
            String::from_utf8_lossy(&once),
            "input: {:?}",
            input
        );
    }

    #[test]
    fn noise_only_input_normalizes_to_empty(
        lines in prop::collection::vec(noise_line(), 0..20),
        trailing_newline in any::<bool>(),
    ) {
        let mut input = lines.join("\n");
        if trailing_newline {
            input.push('\n');
        }
        prop_assert!(normalize_lossy(input.as_bytes()).is_empty(), "input: {:?}", input);
    }

    #[test]
    fn comments_after_first_statement_survive(
        lines in prop::collection::vec(
            prop_oneof![Just(""), Just("--"), Just("-- end"), Just("  -- indented")],
            0..10,
        ),
    ) {
        let input = format!("SELECT 1;\n{}\n", lines.join("\n"));
        let output = normalize_lossy(input.as_bytes());
        prop_assert_eq!(String::from_utf8_lossy(&output), input);
    }

    #[test]
    fn literal_contents_are_never_rewritten(content in "(public\\.|[a-z:/. ]|'')*") {
        let input = format!("CREATE TABLE public.t (c text DEFAULT '{content}');\n");
        let expected = format!("CREATE TABLE t (c text DEFAULT '{content}');\n");
        let output = normalize_lossy(input.as_bytes());
        prop_assert_eq!(String::from_utf8_lossy(&output), expected);
    }

    #[test]
    fn search_path_fix_only_touches_the_empty_value(
        before in "[ ]{0,2}",
        after in "[ ]{0,2}",
        flag in prop_oneof![Just("false"), Just("true"), Just("FALSE")],
    ) {
        let input = format!(
            "SELECT pg_catalog.set_config('search_path',{before}''{after},{before}{flag});\n"
        );
        let expected = input.replacen("''", "'public'", 1);
        let output = normalize_lossy(input.as_bytes());
        prop_assert_eq!(String::from_utf8_lossy(&output), expected);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = normalize(&bytes);
    }
}
