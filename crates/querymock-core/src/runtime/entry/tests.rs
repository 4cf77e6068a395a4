// crates/querymock-core/src/runtime/entry/tests.rs
// ============================================================================
// Module: Mock Entry Unit Tests
// Description: Unit tests for entry matching and trigger bookkeeping.
// Purpose: Validate match rules, once semantics, and expectation messages.
// Dependencies: querymock-core
// ============================================================================

//! ## Overview
//! Drives [`super::MockEntry`] directly through its crate-internal trigger API.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::MockEntry;
use crate::core::ExecPath;
use crate::core::InjectedError;
use crate::core::MockSpec;
use crate::core::Row;
use crate::core::Value;

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Tests that an empty pattern matches any query.
#[test]
fn empty_pattern_matches_everything() {
    let entry = MockEntry::default();
    assert!(entry.try_trigger("SELECT 1", &[]).is_some());
    assert!(entry.try_trigger("DELETE FROM t", &[Value::from(3)]).is_some());
    assert_eq!(entry.trigger_count(), 2);
}

/// Tests that non-strict entries match by containment.
#[test]
fn substring_match_by_default() {
    let entry = MockEntry::default();
    entry.with_query("FROM users");
    assert!(entry.try_trigger("SELECT name FROM users WHERE id=?", &[]).is_some());
    assert!(entry.try_trigger("SELECT name FROM accounts", &[]).is_none());
}

/// Tests that strict entries require exact equality.
#[test]
fn strict_match_requires_equality() {
    let entry = MockEntry::default();
    entry.with_query("SELECT * FROM t").strict_match();
    assert!(entry.try_trigger("SELECT * FROM t WHERE id=?", &[]).is_none());
    assert!(entry.try_trigger("SELECT * FROM t", &[]).is_some());
}

/// Tests that the pattern is normalized when set.
#[test]
fn pattern_is_normalized() {
    let entry = MockEntry::default();
    entry.with_query("  SELECT   *\n FROM\tt ");
    assert_eq!(entry.pattern(), "SELECT * FROM t");

    let from_spec = MockEntry::from_spec(MockSpec::new("UPDATE   t\nSET x=?"));
    assert_eq!(from_spec.pattern(), "UPDATE t SET x=?");
}

/// Tests that an argument filter requires an exact ordered match.
#[test]
fn argument_filter_is_exact() {
    let entry = MockEntry::default();
    entry.with_query("SELECT").with_args([Value::from(1), Value::from("a")]);
    assert!(entry.try_trigger("SELECT x", &[Value::from(1)]).is_none());
    assert!(entry.try_trigger("SELECT x", &[Value::from("a"), Value::from(1)]).is_none());
    assert!(entry.try_trigger("SELECT x", &[Value::from(1), Value::from("a")]).is_some());
}

/// Tests that an empty argument filter only matches argument-free calls.
#[test]
fn empty_argument_filter_matches_no_args() {
    let entry = MockEntry::default();
    entry.with_args(Vec::<Value>::new());
    assert!(entry.try_trigger("SELECT x", &[Value::from(1)]).is_none());
    assert!(entry.try_trigger("SELECT x", &[]).is_some());
}

/// Tests that a once-entry stops matching after its first match.
#[test]
fn one_time_entry_matches_once() {
    let entry = MockEntry::default();
    entry.with_query("SELECT").one_time();
    assert!(entry.try_trigger("SELECT 1", &[]).is_some());
    assert!(entry.try_trigger("SELECT 1", &[]).is_none());
    assert!(entry.is_triggered());
    assert_eq!(entry.trigger_count(), 1);
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Tests that the outcome snapshots the configured reply.
#[test]
fn outcome_carries_reply() {
    let entry = MockEntry::default();
    entry
        .with_query("INSERT")
        .with_reply(vec![Row::new().with("id", 1)])
        .with_rows_affected(4)
        .with_id(9)
        .with_error(InjectedError::no_rows());
    let outcome = entry.try_trigger("INSERT INTO t VALUES (?)", &[]).unwrap().outcome;
    assert_eq!(outcome.pattern.as_deref(), Some("INSERT"));
    assert_eq!(outcome.rows, vec![Row::new().with("id", 1)]);
    assert_eq!(outcome.rows_affected, 4);
    assert_eq!(outcome.last_insert_id, Some(9));
    assert_eq!(outcome.error, Some(InjectedError::no_rows()));
}

/// Tests that spec failure flags become exception hooks.
#[test]
fn failure_flags_become_hooks() {
    let spec = MockSpec {
        fail_query: true,
        ..MockSpec::new("SELECT")
    };
    let entry = MockEntry::from_spec(spec);
    let outcome = entry.try_trigger("SELECT 1", &[]).unwrap().outcome;
    assert!(outcome.should_fail(ExecPath::Read));
    assert!(!outcome.should_fail(ExecPath::Write));
}

/// Tests that conditional exception predicates are evaluated per execution.
#[test]
fn conditional_exception_consults_predicate() {
    let entry = MockEntry::default();
    entry.with_exec_exception_when(|| false);
    let outcome = entry.try_trigger("UPDATE t", &[]).unwrap().outcome;
    assert!(!outcome.should_fail(ExecPath::Write));

    entry.with_exec_exception();
    let outcome = entry.try_trigger("UPDATE t", &[]).unwrap().outcome;
    assert!(outcome.should_fail(ExecPath::Write));
}

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// Tests that entries without an expectation never report a mismatch.
#[test]
fn no_expectation_no_mismatch() {
    let entry = MockEntry::default();
    assert_eq!(entry.expectation_mismatch(), None);
}

/// Tests the mismatch message format.
#[test]
fn mismatch_message_names_pattern_and_counts() {
    let entry = MockEntry::default();
    entry.with_query("SELECT a").with_expected_trigger_count(2);
    entry.try_trigger("SELECT a", &[]);
    assert_eq!(
        entry.expectation_mismatch().as_deref(),
        Some("expected `SELECT a` to be triggered 2 times, but got 1")
    );
    entry.try_trigger("SELECT a", &[]);
    assert_eq!(entry.expectation_mismatch(), None);
}

/// Tests that an expectation of zero asserts the entry never matched.
#[test]
fn zero_expectation_requires_no_match() {
    let entry = MockEntry::default();
    entry.with_query("DELETE").with_expected_trigger_count(0);
    assert_eq!(entry.expectation_mismatch(), None);
    entry.try_trigger("DELETE FROM t", &[]);
    assert!(entry.expectation_mismatch().is_some());
}

/// Tests the ordering key.
#[test]
fn sort_key_is_priority_then_length() {
    let entry = MockEntry::default();
    entry.with_query("SELECT abc").with_priority(2);
    assert_eq!(entry.sort_key(), (2, 10));
}

/// Tests that a match captures the filter and priority that decided it.
#[test]
fn triggered_match_captures_deciding_state() {
    let entry = MockEntry::default();
    entry.with_query("SELECT").with_args([1]).with_priority(3);
    let triggered = entry.try_trigger("SELECT x", &[Value::from(1)]).unwrap();

    entry.with_priority(0).with_args([2]);
    assert_eq!(triggered.priority, 3);
    assert_eq!(triggered.args, Some(vec![Value::from(1)]));
    assert_eq!(entry.priority(), 0);
    assert_eq!(entry.args(), Some(vec![Value::from(2)]));
}

/// Tests that the spec copy reflects fluent configuration.
#[test]
fn spec_reflects_fluent_setters() {
    let entry = MockEntry::default();
    entry.with_query(" DELETE  FROM t ").one_time().with_rows_affected(2);
    let spec = entry.spec();
    assert_eq!(spec.pattern, "DELETE FROM t");
    assert!(spec.once);
    assert_eq!(spec.rows_affected, 2);
    assert_eq!(spec.args, None);
}
