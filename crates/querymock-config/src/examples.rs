// crates/querymock-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Query Mock configuration. The output is static and
//! kept valid against [`crate::QueryMockConfig::validate`].

/// Returns a canonical example `querymock.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[catcher]
logging = false
panic_on_no_match = false

[log]
sink = "stderr"

[[mocks]]
pattern = "SELECT name FROM users WHERE"
priority = 1
rows = [{ name = "A" }, { name = "B" }]

[[mocks]]
pattern = "INSERT INTO users"
last_insert_id = 42
expected_trigger_count = 1

[[mocks]]
pattern = "DELETE FROM sessions"
once = true
rows_affected = 3

[[mocks]]
pattern = "SELECT * FROM accounts WHERE id = ?"
strict = true
args = [404]
error = { code = "no_rows", message = "no rows in result set" }
"#,
    )
}
