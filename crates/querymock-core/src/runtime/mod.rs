// crates/querymock-core/src/runtime/mod.rs
// ============================================================================
// Module: Query Mock Runtime
// Description: Catcher registry, mock entries, and statement emulation.
// Purpose: Hold the shared mock state and serve statement executions.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime owns all mutable state: the [`Catcher`] registry with its
//! [`MockEntry`] list and frequency tables, plus the per-execution
//! [`MockStatement`] and [`RowCursor`] types.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catcher;
pub mod cursor;
pub mod entry;
pub mod statement;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catcher::Catcher;
pub use catcher::ResolveError;
pub use catcher::TriggerReport;
pub use cursor::RowCursor;
pub use entry::MockEntry;
pub use statement::ExecError;
pub use statement::ExecOutcome;
pub use statement::ExecResult;
pub use statement::MockStatement;
pub use statement::emulate_exec;
pub use statement::emulate_query;
