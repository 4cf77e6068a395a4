// crates/querymock-config/src/lib.rs
// ============================================================================
// Module: Query Mock Config Library
// Description: Canonical config model, validation, and fixture loading.
// Purpose: Single source of truth for querymock.toml semantics.
// Dependencies: querymock-core, serde, toml
// ============================================================================

//! ## Overview
//! `querymock-config` loads `querymock.toml`, validates it, and builds a
//! [`querymock_core::Catcher`] with the configured toggles, log sink, and
//! fixture mocks. Mock-only fixture files load through [`load_fixtures`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
