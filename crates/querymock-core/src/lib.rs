// crates/querymock-core/src/lib.rs
// ============================================================================
// Module: Query Mock Core Library
// Description: Public API surface for the query mock engine.
// Purpose: Expose mock registration, resolution, and statement emulation.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Query Mock stands in for a database backend in tests. Test code registers
//! mocks on a [`Catcher`]; every statement execution is resolved to the best
//! matching mock and returns its rows, affected count, insert id, or an
//! injected failure. The catcher records every query it saw and every query
//! that matched nothing.
//!
//! ```
//! use std::sync::Arc;
//!
//! use querymock_core::Catcher;
//! use querymock_core::MockStatement;
//! use querymock_core::Row;
//! use querymock_core::Value;
//!
//! let catcher = Catcher::shared();
//! catcher
//!     .new_mock()
//!     .with_query("SELECT name FROM users WHERE")
//!     .with_reply(vec![Row::new().with("name", "A"), Row::new().with("name", "B")]);
//!
//! let statement = MockStatement::new(Arc::clone(&catcher), "SELECT name FROM users WHERE id=?");
//! let mut cursor = statement.query(&[Value::from(5)]).unwrap();
//! assert_eq!(cursor.columns(), ["name"]);
//! assert_eq!(cursor.next_row().unwrap(), Some(&[Value::from("A")][..]));
//! assert_eq!(catcher.received_count("SELECT name FROM users WHERE id=5"), 1);
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::LogSink;
pub use interfaces::NoopLogSink;
pub use interfaces::ResolutionEvent;
pub use interfaces::StderrLogSink;
pub use interfaces::WriterLogSink;
pub use runtime::Catcher;
pub use runtime::ExecError;
pub use runtime::ExecOutcome;
pub use runtime::ExecResult;
pub use runtime::MockEntry;
pub use runtime::MockStatement;
pub use runtime::ResolveError;
pub use runtime::RowCursor;
pub use runtime::TriggerReport;
pub use runtime::emulate_exec;
pub use runtime::emulate_query;
