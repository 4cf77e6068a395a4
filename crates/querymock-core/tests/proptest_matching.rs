// crates/querymock-core/tests/proptest_matching.rs
// ============================================================================
// Module: Matching Property-Based Tests
// Description: Property tests for normalization and resolution order.
// Purpose: Check ordering and whitespace invariants across wide inputs.
// ============================================================================

//! Property-based tests for normalization and resolution order.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use querymock_core::Catcher;
use querymock_core::complete_statement;
use querymock_core::normalize;

/// Joins words with arbitrary whitespace runs.
fn spaced(words: &[String], gaps: &[String]) -> String {
    let mut text = String::new();
    for (index, word) in words.iter().enumerate() {
        text.push_str(gaps.get(index).map_or(" ", String::as_str));
        text.push_str(word);
    }
    text.push_str(gaps.last().map_or("", String::as_str));
    text
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "[ \\t\\nA-Za-z0-9=?*]{0,64}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.starts_with(' '));
        prop_assert!(!once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn normalize_ignores_whitespace_layout(
        words in prop::collection::vec("[A-Z*=]{1,8}", 1 .. 8),
        gaps in prop::collection::vec("[ \\t\\n]{1,4}", 1 .. 10),
    ) {
        prop_assert_eq!(normalize(&spaced(&words, &gaps)), words.join(" "));
    }

    #[test]
    fn completion_without_args_is_identity(text in "[A-Za-z ?$0-9=]{0,48}") {
        prop_assert_eq!(complete_statement(&text, &[]), text);
    }

    #[test]
    fn highest_priority_then_longest_pattern_wins(
        entries in prop::collection::vec((0_i64 .. 3, 0_usize .. 6), 1 .. 12),
    ) {
        let query = "SELECT abcdef";
        let catcher = Catcher::new();
        for (index, (priority, length)) in entries.iter().enumerate() {
            let pattern = format!("SELECT {}", &"abcdef"[.. *length]);
            let id = i64::try_from(index).unwrap();
            catcher.new_mock().with_query(&pattern).with_priority(*priority).with_id(id);
        }

        let winner = entries
            .iter()
            .enumerate()
            .max_by(|(left_index, left), (right_index, right)| {
                left.cmp(right).then_with(|| right_index.cmp(left_index))
            })
            .map(|(index, _)| i64::try_from(index).unwrap());

        let outcome = catcher.resolve(query, &[]).unwrap();
        prop_assert_eq!(outcome.last_insert_id, winner);
    }
}
