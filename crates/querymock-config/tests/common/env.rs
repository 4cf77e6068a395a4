// crates/querymock-config/tests/common/env.rs
// ============================================================================
// Module: Test Environment Helpers
// Description: Safe wrappers for test-only environment mutation.
// Purpose: Centralize env var changes with explicit safety notes.
// ============================================================================

#![allow(unsafe_code, reason = "Test harness mutates process env for config path resolution.")]

/// Sets an environment variable for the current process.
pub fn set_var(key: &str, value: &str) {
    // SAFETY: The env test binary runs one test, so no other thread reads the environment.
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Removes an environment variable from the current process.
pub fn remove_var(key: &str) {
    // SAFETY: The env test binary runs one test, so no other thread reads the environment.
    unsafe {
        std::env::remove_var(key);
    }
}
