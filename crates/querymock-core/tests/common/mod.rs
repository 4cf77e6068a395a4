// crates/querymock-core/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Helpers
// Description: Helpers shared by querymock-core integration tests.
// ============================================================================

//! Shared helpers for integration tests.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Helpers are shared across test binaries that each use a subset."
)]

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use querymock_core::RowCursor;
use querymock_core::Value;

/// In-memory writer whose contents stay readable after being handed to a sink.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    /// Bytes written so far.
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Returns the written JSON lines parsed as values.
    pub fn events(&self) -> Vec<serde_json::Value> {
        let bytes = self.bytes.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Drains a cursor into owned rows.
pub fn drain(cursor: &mut RowCursor) -> Vec<Vec<Value>> {
    let mut rows = Vec::new();
    while let Some(row) = cursor.next_row().unwrap() {
        rows.push(row.to_vec());
    }
    rows
}

/// Builds a text value.
pub fn text(value: &str) -> Value {
    Value::from(value)
}
