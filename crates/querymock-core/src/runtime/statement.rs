// crates/querymock-core/src/runtime/statement.rs
// ============================================================================
// Module: Query Mock Statement Emulation
// Description: Turn resolved outcomes into executed-statement results.
// Purpose: Emulate query and exec calls against the catcher.
// Dependencies: crate::core, crate::runtime::catcher, rand, thiserror
// ============================================================================

//! ## Overview
//! A [`MockStatement`] stands in for a prepared statement of a real backend.
//! Each call resolves the statement text against the [`Catcher`] and turns
//! the outcome into a [`RowCursor`] (read path) or an [`ExecResult`] (write
//! path). Effects apply in a fixed order: closed check, resolution, exception
//! trigger, side-effect callback, injected error, payload.
//! Invariants:
//! - A read-path exception trigger never fails a write, and vice versa.
//! - An injected error always wins over the row or scalar payload.
//! - A closed statement fails every call with [`ExecError::StatementClosed`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use rand::Rng;
use thiserror::Error;

use crate::core::CommandKind;
use crate::core::ExecPath;
use crate::core::InjectedError;
use crate::core::Outcome;
use crate::core::Value;
use crate::runtime::catcher::Catcher;
use crate::runtime::catcher::ResolveError;
use crate::runtime::cursor::RowCursor;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors surfaced by statement execution.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// Simulated broken connection from an exception trigger.
    #[error("bad connection")]
    BadConnection,
    /// Error configured on the matched mock.
    #[error("injected error: {0}")]
    Injected(InjectedError),
    /// Command keyword the emulation does not handle.
    #[error("unsupported statement command: {0:?}")]
    UnsupportedCommand(String),
    /// Statement used after close.
    #[error("statement has been closed")]
    StatementClosed,
    /// Cursor used after close.
    #[error("cursor has been closed")]
    CursorClosed,
    /// Resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Scalar result of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Number of affected rows.
    pub rows_affected: i64,
    /// Generated id, reported for `INSERT` only.
    pub last_insert_id: Option<i64>,
}

/// Result of [`MockStatement::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome {
    /// Rows of a read statement.
    Rows(RowCursor),
    /// Scalar result of a mutating statement.
    Written(ExecResult),
}

// ============================================================================
// SECTION: Emulation
// ============================================================================

/// Produces the read-path result for a resolved outcome.
///
/// # Errors
///
/// Returns [`ExecError::BadConnection`] when the read exception trigger fires
/// and [`ExecError::Injected`] when the mock carries an error.
pub fn emulate_query(
    outcome: &Outcome,
    query: &str,
    args: &[Value],
) -> Result<RowCursor, ExecError> {
    if outcome.should_fail(ExecPath::Read) {
        return Err(ExecError::BadConnection);
    }
    outcome.notify(query, args);
    if let Some(error) = &outcome.error {
        return Err(ExecError::Injected(error.clone()));
    }
    Ok(RowCursor::from_rows(&outcome.rows))
}

/// Produces the write-path result for a resolved outcome.
///
/// # Errors
///
/// Returns [`ExecError::BadConnection`] when the write exception trigger
/// fires, [`ExecError::Injected`] when the mock carries an error, and
/// [`ExecError::UnsupportedCommand`] for commands other than
/// `INSERT`/`UPDATE`/`DELETE`.
pub fn emulate_exec(
    outcome: &Outcome,
    command: &CommandKind,
    query: &str,
    args: &[Value],
) -> Result<ExecResult, ExecError> {
    if outcome.should_fail(ExecPath::Write) {
        return Err(ExecError::BadConnection);
    }
    outcome.notify(query, args);
    if let Some(error) = &outcome.error {
        return Err(ExecError::Injected(error.clone()));
    }
    match command {
        CommandKind::Insert => Ok(ExecResult {
            rows_affected: 1,
            last_insert_id: Some(outcome.last_insert_id.unwrap_or_else(generated_id)),
        }),
        CommandKind::Update | CommandKind::Delete => Ok(ExecResult {
            rows_affected: outcome.rows_affected,
            last_insert_id: None,
        }),
        CommandKind::Select | CommandKind::Other(_) => {
            Err(ExecError::UnsupportedCommand(command.as_str().to_string()))
        }
    }
}

/// Returns an arbitrary non-zero insert id.
fn generated_id() -> i64 {
    rand::thread_rng().gen_range(1 ..= i64::MAX)
}

// ============================================================================
// SECTION: Statement
// ============================================================================

/// Statement bound to a catcher.
///
/// # Invariants
/// - `command` is derived once from the statement text.
pub struct MockStatement {
    /// Catcher resolving every execution.
    catcher: Arc<Catcher>,
    /// Original statement text.
    query: String,
    /// Command derived from the first keyword.
    command: CommandKind,
    /// Set once the statement is closed.
    closed: bool,
}

impl MockStatement {
    /// Prepares a statement against the catcher.
    #[must_use]
    pub fn new(catcher: Arc<Catcher>, query: impl Into<String>) -> Self {
        let query = query.into();
        let command = CommandKind::detect(&query);
        Self {
            catcher,
            query,
            command,
            closed: false,
        }
    }

    /// Returns the original statement text.
    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query
    }

    /// Returns the detected command kind.
    #[must_use]
    pub const fn command(&self) -> &CommandKind {
        &self.command
    }

    /// Resolves the statement, failing when it was closed.
    fn resolve(&self, args: &[Value]) -> Result<Outcome, ExecError> {
        if self.closed {
            return Err(ExecError::StatementClosed);
        }
        Ok(self.catcher.resolve(&self.query, args)?)
    }

    /// Runs the statement on the read path.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] when the statement is closed, resolution fails,
    /// or the matched mock injects a failure.
    pub fn query(&self, args: &[Value]) -> Result<RowCursor, ExecError> {
        let outcome = self.resolve(args)?;
        emulate_query(&outcome, &self.query, args)
    }

    /// Runs the statement on the write path.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] when the statement is closed, resolution fails,
    /// the matched mock injects a failure, or the command is not mutating.
    pub fn exec(&self, args: &[Value]) -> Result<ExecResult, ExecError> {
        let outcome = self.resolve(args)?;
        emulate_exec(&outcome, &self.command, &self.query, args)
    }

    /// Runs the statement on the path chosen by its command kind.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] as [`MockStatement::query`] or
    /// [`MockStatement::exec`] would.
    pub fn execute(&self, args: &[Value]) -> Result<ExecOutcome, ExecError> {
        if self.command.is_read() {
            self.query(args).map(ExecOutcome::Rows)
        } else {
            self.exec(args).map(ExecOutcome::Written)
        }
    }

    /// Closes the statement; closing twice is a no-op.
    pub const fn close(&mut self) {
        self.closed = true;
    }

    /// Returns true once the statement is closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
