// crates/querymock-core/src/core/mod.rs
// ============================================================================
// Module: Query Mock Core Types
// Description: Values, query text handling, and mock definitions.
// Purpose: Provide the plain data types shared by the catcher and emulation.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types carry no shared state. They describe values, canonical query
//! text, and what a mock matches and returns.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod mock;
pub mod query;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use mock::ExceptionHook;
pub use mock::ExecPath;
pub use mock::InjectedError;
pub use mock::MockHooks;
pub use mock::MockSpec;
pub use mock::Outcome;
pub use mock::PRIORITY_GLOBAL;
pub use mock::PRIORITY_TEST_CASE;
pub use mock::PRIORITY_TEST_SUITE;
pub use mock::QueryCallback;
pub use query::CommandKind;
pub use query::complete_statement;
pub use query::normalize;
pub use value::Row;
pub use value::Value;
