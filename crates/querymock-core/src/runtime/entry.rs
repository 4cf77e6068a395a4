// crates/querymock-core/src/runtime/entry.rs
// ============================================================================
// Module: Query Mock Entry
// Description: One registered expectation with its own lock.
// Purpose: Hold match conditions, reply, and trigger bookkeeping for a mock.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A [`MockEntry`] is owned by the [`crate::Catcher`] and handed out as
//! `Arc<MockEntry>` for fluent configuration. Every setter takes `&self` and
//! returns `&Self`, so registration reads as a chain:
//!
//! ```
//! use querymock_core::Catcher;
//! use querymock_core::Row;
//!
//! let catcher = Catcher::new();
//! catcher
//!     .new_mock()
//!     .with_query("SELECT name FROM users WHERE")
//!     .with_reply(vec![Row::new().with("name", "A")])
//!     .one_time();
//! ```
//!
//! Invariants:
//! - A once-entry that has triggered is never eligible again.
//! - Matching, marking, and counting happen under one acquisition of the
//!   entry lock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::core::InjectedError;
use crate::core::MockHooks;
use crate::core::MockSpec;
use crate::core::Outcome;
use crate::core::Row;
use crate::core::Value;
use crate::core::mock::always_fail;
use crate::core::normalize;

// ============================================================================
// SECTION: Entry State
// ============================================================================

/// Mutable state of a mock entry.
#[derive(Debug, Default)]
struct EntryState {
    /// Match conditions and reply.
    spec: MockSpec,
    /// Callback and exception predicates.
    hooks: MockHooks,
    /// Set on the first successful match.
    triggered: bool,
    /// Number of successful matches.
    trigger_count: u32,
}

impl EntryState {
    /// Returns true when the entry matches the query and arguments.
    fn matches(&self, query: &str, args: &[Value]) -> bool {
        if self.spec.once && self.triggered {
            return false;
        }
        let pattern = self.spec.pattern.as_str();
        let query_matches = pattern.is_empty()
            || if self.spec.strict { query == pattern } else { query.contains(pattern) };
        query_matches && self.spec.args.as_deref().is_none_or(|expected| expected == args)
    }

    /// Builds the outcome snapshot for a match.
    fn outcome(&self) -> Outcome {
        let mut hooks = self.hooks.clone();
        if self.spec.fail_query && hooks.query_exception.is_none() {
            hooks.query_exception = Some(always_fail());
        }
        if self.spec.fail_exec && hooks.exec_exception.is_none() {
            hooks.exec_exception = Some(always_fail());
        }
        Outcome {
            pattern: Some(self.spec.pattern.clone()),
            rows: self.spec.rows.clone(),
            rows_affected: self.spec.rows_affected,
            last_insert_id: self.spec.last_insert_id,
            error: self.spec.error.clone(),
            hooks,
        }
    }
}

// ============================================================================
// SECTION: Triggered Match
// ============================================================================

/// Match captured under the entry lock.
#[derive(Debug)]
pub(crate) struct Triggered {
    /// Reply snapshot.
    pub(crate) outcome: Outcome,
    /// Argument filter that decided the match.
    pub(crate) args: Option<Vec<Value>>,
    /// Priority that decided the match.
    pub(crate) priority: i64,
}

// ============================================================================
// SECTION: Mock Entry
// ============================================================================

/// One registered expectation.
#[derive(Debug, Default)]
pub struct MockEntry {
    /// Entry state guarded against concurrent configuration and resolution.
    state: Mutex<EntryState>,
}

impl MockEntry {
    /// Creates an entry from a spec, normalizing its pattern.
    #[must_use]
    pub fn from_spec(mut spec: MockSpec) -> Self {
        spec.pattern = normalize(&spec.pattern);
        Self {
            state: Mutex::new(EntryState {
                spec,
                ..EntryState::default()
            }),
        }
    }

    /// Locks the entry state.
    fn lock(&self) -> MutexGuard<'_, EntryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------------
    // Fluent setters
    // ------------------------------------------------------------------------

    /// Sets the query pattern (normalized).
    pub fn with_query(&self, pattern: &str) -> &Self {
        self.lock().spec.pattern = normalize(pattern);
        self
    }

    /// Requires the query to equal the pattern instead of containing it.
    pub fn strict_match(&self) -> &Self {
        self.lock().spec.strict = true;
        self
    }

    /// Requires the bound arguments to equal the list exactly.
    pub fn with_args<I, V>(&self, args: I) -> &Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.lock().spec.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the rows returned to read statements.
    pub fn with_reply(&self, rows: Vec<Row>) -> &Self {
        self.lock().spec.rows = rows;
        self
    }

    /// Limits the entry to a single match.
    pub fn one_time(&self) -> &Self {
        self.lock().spec.once = true;
        self
    }

    /// Fails every write statement with a broken connection.
    pub fn with_exec_exception(&self) -> &Self {
        self.lock().hooks.exec_exception = Some(always_fail());
        self
    }

    /// Fails every read statement with a broken connection.
    pub fn with_query_exception(&self) -> &Self {
        self.lock().hooks.query_exception = Some(always_fail());
        self
    }

    /// Fails write statements whenever the predicate returns true.
    pub fn with_exec_exception_when(
        &self,
        predicate: impl Fn() -> bool + Send + Sync + 'static,
    ) -> &Self {
        self.lock().hooks.exec_exception = Some(Arc::new(predicate));
        self
    }

    /// Fails read statements whenever the predicate returns true.
    pub fn with_query_exception_when(
        &self,
        predicate: impl Fn() -> bool + Send + Sync + 'static,
    ) -> &Self {
        self.lock().hooks.query_exception = Some(Arc::new(predicate));
        self
    }

    /// Runs the callback with the query text and arguments on every match.
    pub fn with_callback(
        &self,
        callback: impl Fn(&str, &[Value]) + Send + Sync + 'static,
    ) -> &Self {
        self.lock().hooks.callback = Some(Arc::new(callback));
        self
    }

    /// Sets the affected row count for `UPDATE`/`DELETE`.
    pub fn with_rows_affected(&self, rows: i64) -> &Self {
        self.lock().spec.rows_affected = rows;
        self
    }

    /// Sets the insert id for `INSERT`.
    pub fn with_id(&self, id: i64) -> &Self {
        self.lock().spec.last_insert_id = Some(id);
        self
    }

    /// Surfaces the error instead of any payload.
    pub fn with_error(&self, error: InjectedError) -> &Self {
        self.lock().spec.error = Some(error);
        self
    }

    /// Sets the number of matches expected by the end of the test.
    pub fn with_expected_trigger_count(&self, expected: u32) -> &Self {
        self.lock().spec.expected_trigger_count = Some(expected);
        self
    }

    /// Sets the match priority.
    pub fn with_priority(&self, priority: i64) -> &Self {
        self.lock().spec.priority = priority;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the normalized pattern.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.lock().spec.pattern.clone()
    }

    /// Returns the match priority.
    #[must_use]
    pub fn priority(&self) -> i64 {
        self.lock().spec.priority
    }

    /// Returns the argument filter.
    #[must_use]
    pub fn args(&self) -> Option<Vec<Value>> {
        self.lock().spec.args.clone()
    }

    /// Returns true once the entry has matched at least once.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.lock().triggered
    }

    /// Returns the number of successful matches.
    #[must_use]
    pub fn trigger_count(&self) -> u32 {
        self.lock().trigger_count
    }

    /// Returns a copy of the entry's specification.
    #[must_use]
    pub fn spec(&self) -> MockSpec {
        self.lock().spec.clone()
    }

    // ------------------------------------------------------------------------
    // Catcher internals
    // ------------------------------------------------------------------------

    /// Returns the ordering key: priority, then pattern length.
    pub(crate) fn sort_key(&self) -> (i64, usize) {
        let state = self.lock();
        (state.spec.priority, state.spec.pattern.len())
    }

    /// Matches the entry and, on success, marks it triggered and counts it.
    pub(crate) fn try_trigger(&self, query: &str, args: &[Value]) -> Option<Triggered> {
        let mut state = self.lock();
        if !state.matches(query, args) {
            return None;
        }
        state.triggered = true;
        state.trigger_count = state.trigger_count.saturating_add(1);
        Some(Triggered {
            outcome: state.outcome(),
            args: state.spec.args.clone(),
            priority: state.spec.priority,
        })
    }

    /// Describes a trigger-count mismatch, if one is configured and present.
    pub(crate) fn expectation_mismatch(&self) -> Option<String> {
        let state = self.lock();
        let expected = state.spec.expected_trigger_count?;
        (expected != state.trigger_count).then(|| {
            format!(
                "expected `{}` to be triggered {} times, but got {}",
                state.spec.pattern, expected, state.trigger_count
            )
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
