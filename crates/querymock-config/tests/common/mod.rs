// crates/querymock-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for querymock-config tests.
// ============================================================================

//! Shared helpers for config tests.

#![allow(dead_code, reason = "Helpers are shared across test binaries that each use a subset.")]

pub mod env;

use std::fs;
use std::path::PathBuf;

use querymock_config::ConfigError;
use tempfile::TempDir;

/// Result type for config tests.
pub type TestResult = Result<(), String>;

/// Writes `content` to a config file inside a fresh temp dir.
pub fn write_config(content: &str) -> Result<(TempDir, PathBuf), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("querymock.toml");
    fs::write(&path, content).map_err(|err| err.to_string())?;
    Ok((dir, path))
}

/// Checks that the result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
