// crates/querymock-core/src/runtime/cursor.rs
// ============================================================================
// Module: Query Mock Row Cursor
// Description: Forward-only cursor over a resolved reply.
// Purpose: Deliver matched rows to the caller in column order.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A [`RowCursor`] is built once per execution from a snapshot of the matched
//! rows. Columns come from the first row; every row is projected onto that
//! column list, with missing cells as [`Value::Null`]. The cursor starts
//! before the first row and only moves forward.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Row;
use crate::core::Value;
use crate::runtime::statement::ExecError;

// ============================================================================
// SECTION: Row Cursor
// ============================================================================

/// Forward-only cursor over materialized rows.
///
/// # Invariants
/// - Every row has exactly `columns.len()` cells.
/// - Rows keep the order of the mock's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct RowCursor {
    /// Column names taken from the first reply row.
    columns: Vec<String>,
    /// Projected rows.
    rows: Vec<Vec<Value>>,
    /// Index of the next row to yield.
    next: usize,
    /// Set once the cursor is closed.
    closed: bool,
}

impl RowCursor {
    /// Materializes a cursor from reply rows.
    #[must_use]
    pub fn from_rows(reply: &[Row]) -> Self {
        let columns: Vec<String> =
            reply.first().map(|row| row.columns().map(str::to_string).collect()).unwrap_or_default();
        let rows = reply
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self {
            columns,
            rows,
            next: 0,
            closed: false,
        }
    }

    /// Returns the column names.
    ///
    /// Columns are in ascending name order, not the order a statement lists
    /// them: `SELECT name, age` yields `["age", "name"]`.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the position of a column.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    /// Returns the total number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the cursor holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Advances to the next row and returns its cells in column order.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::CursorClosed`] after [`RowCursor::close`].
    pub fn next_row(&mut self) -> Result<Option<&[Value]>, ExecError> {
        if self.closed {
            return Err(ExecError::CursorClosed);
        }
        let Some(row) = self.rows.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        Ok(Some(row.as_slice()))
    }

    /// Drains the remaining rows.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::CursorClosed`] after [`RowCursor::close`].
    pub fn collect_remaining(&mut self) -> Result<Vec<Vec<Value>>, ExecError> {
        if self.closed {
            return Err(ExecError::CursorClosed);
        }
        let remaining = self.rows.get(self.next ..).unwrap_or_default().to_vec();
        self.next = self.rows.len();
        Ok(remaining)
    }

    /// Closes the cursor; closing twice is a no-op.
    pub const fn close(&mut self) {
        self.closed = true;
    }

    /// Returns true once the cursor is closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}
