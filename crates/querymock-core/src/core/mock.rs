// crates/querymock-core/src/core/mock.rs
// ============================================================================
// Module: Query Mock Definitions
// Description: Mock specifications, injected errors, hooks, and outcomes.
// Purpose: Describe what a registered mock matches and what it returns.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`MockSpec`] is the plain-data description of one expectation: the
//! match condition (pattern, strictness, argument filter, priority, once-flag)
//! and the canned reply. Specs deserialize from fixture files. Behavior that
//! cannot be expressed as data (side-effect callbacks, conditional failure
//! predicates) lives in [`MockHooks`]. Resolution hands the caller an
//! [`Outcome`]: a snapshot of the matched reply, or the empty default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::value::Row;
use crate::core::value::Value;

// ============================================================================
// SECTION: Priorities
// ============================================================================

/// Priority for process-wide default replies.
pub const PRIORITY_GLOBAL: i64 = 0;
/// Priority for replies shared by a test suite.
pub const PRIORITY_TEST_SUITE: i64 = 1;
/// Priority for replies specific to one test case.
pub const PRIORITY_TEST_CASE: i64 = 2;

// ============================================================================
// SECTION: Injected Errors
// ============================================================================

/// Caller-supplied error surfaced verbatim by a matching statement.
///
/// # Invariants
/// - Two injected errors are equal when both code and message are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct InjectedError {
    /// Stable error code for programmatic checks.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl InjectedError {
    /// Creates an injected error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns the conventional "no rows in result set" error.
    #[must_use]
    pub fn no_rows() -> Self {
        Self::new("no_rows", "no rows in result set")
    }
}

// ============================================================================
// SECTION: Mock Specification
// ============================================================================

/// Fully specified mock expectation.
///
/// # Invariants
/// - An empty `pattern` matches every query.
/// - `args = None` ignores bound arguments; `Some(list)` requires an exact,
///   ordered, element-wise equal argument list (an empty list matches only
///   argument-free calls).
/// - `rows_affected` is reported for `UPDATE`/`DELETE`; `last_insert_id` for
///   `INSERT` (a generated non-zero id when unset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MockSpec {
    /// Query pattern (normalized on registration).
    pub pattern: String,
    /// Match priority; higher values are tried first.
    pub priority: i64,
    /// Exact-equality matching instead of substring containment.
    pub strict: bool,
    /// Optional exact argument filter.
    pub args: Option<Vec<Value>>,
    /// Rows returned to read statements.
    pub rows: Vec<Row>,
    /// Mock is eligible for a single match only.
    pub once: bool,
    /// Expected number of matches, checked after the fact.
    pub expected_trigger_count: Option<u32>,
    /// Affected row count reported to `UPDATE`/`DELETE`.
    pub rows_affected: i64,
    /// Insert id reported to `INSERT`.
    pub last_insert_id: Option<i64>,
    /// Error surfaced instead of any payload.
    pub error: Option<InjectedError>,
    /// Read statements fail with a broken connection.
    pub fail_query: bool,
    /// Write statements fail with a broken connection.
    pub fail_exec: bool,
}

impl MockSpec {
    /// Creates a spec matching the provided pattern with default reply.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }
}

// ============================================================================
// SECTION: Hooks
// ============================================================================

/// Side-effect callback invoked with the original query text and arguments.
pub type QueryCallback = Arc<dyn Fn(&str, &[Value]) + Send + Sync>;

/// Predicate deciding at execution time whether to simulate a broken connection.
pub type ExceptionHook = Arc<dyn Fn() -> bool + Send + Sync>;

/// Execution path a statement takes through the emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecPath {
    /// Row-returning query path.
    Read,
    /// Mutating exec path.
    Write,
}

/// Behavioral hooks attached to a mock.
///
/// # Invariants
/// - Read and write exception hooks are independent.
#[derive(Clone, Default)]
pub struct MockHooks {
    /// Callback run on every execution served by the mock.
    pub callback: Option<QueryCallback>,
    /// Broken-connection predicate for the read path.
    pub query_exception: Option<ExceptionHook>,
    /// Broken-connection predicate for the write path.
    pub exec_exception: Option<ExceptionHook>,
}

impl fmt::Debug for MockHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHooks")
            .field("callback", &self.callback.is_some())
            .field("query_exception", &self.query_exception.is_some())
            .field("exec_exception", &self.exec_exception.is_some())
            .finish()
    }
}

/// Returns a predicate that always fires.
pub(crate) fn always_fail() -> ExceptionHook {
    Arc::new(|| true)
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Resolved reply for one statement execution.
///
/// # Invariants
/// - `pattern` is `None` only for the empty default returned on no match.
/// - The outcome is a snapshot; later changes to the mock do not affect it.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// Pattern of the matched mock, if any.
    pub pattern: Option<String>,
    /// Rows for read statements.
    pub rows: Vec<Row>,
    /// Affected row count for `UPDATE`/`DELETE`.
    pub rows_affected: i64,
    /// Configured insert id for `INSERT`.
    pub last_insert_id: Option<i64>,
    /// Injected error, overriding any payload.
    pub error: Option<InjectedError>,
    /// Hooks of the matched mock.
    pub hooks: MockHooks,
}

impl Outcome {
    /// Returns the empty default used when no mock matches.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when the outcome came from a registered mock.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.pattern.is_some()
    }

    /// Evaluates the exception predicate for the execution path.
    #[must_use]
    pub fn should_fail(&self, path: ExecPath) -> bool {
        let hook = match path {
            ExecPath::Read => self.hooks.query_exception.as_ref(),
            ExecPath::Write => self.hooks.exec_exception.as_ref(),
        };
        hook.is_some_and(|predicate| predicate())
    }

    /// Runs the side-effect callback, if any.
    pub fn notify(&self, query: &str, args: &[Value]) {
        if let Some(callback) = &self.hooks.callback {
            callback(query, args);
        }
    }
}
