// crates/querymock-core/src/interfaces/mod.rs
// ============================================================================
// Module: Query Mock Interfaces
// Description: Resolution log events and sinks.
// Purpose: Emit one structured line per resolution without hard deps.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The catcher reports each resolution to a [`LogSink`] while logging is on.
//! Events are JSON lines so test runs can be grepped or parsed. Sinks never
//! fail the caller: write errors are dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event label for a query served by a mock.
pub const EVENT_MATCHED: &str = "query_matched";
/// Event label for a query no mock matched.
pub const EVENT_UNMATCHED: &str = "query_unmatched";

/// Resolution log event payload.
///
/// # Invariants
/// - `pattern`, `args`, and `priority` are `None` for unmatched queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Normalized query text.
    pub query: String,
    /// Query with placeholders substituted.
    pub completed: String,
    /// Pattern of the matched mock.
    pub pattern: Option<String>,
    /// Argument filter of the matched mock.
    pub args: Option<Vec<Value>>,
    /// Priority of the matched mock.
    pub priority: Option<i64>,
}

impl ResolutionEvent {
    /// Creates an event for a matched query.
    #[must_use]
    pub fn matched(
        query: &str,
        completed: &str,
        pattern: &str,
        args: Option<Vec<Value>>,
        priority: i64,
    ) -> Self {
        Self {
            event: EVENT_MATCHED,
            timestamp_ms: now_ms(),
            query: query.to_string(),
            completed: completed.to_string(),
            pattern: Some(pattern.to_string()),
            args,
            priority: Some(priority),
        }
    }

    /// Creates an event for an unmatched query.
    #[must_use]
    pub fn unmatched(query: &str, completed: &str) -> Self {
        Self {
            event: EVENT_UNMATCHED,
            timestamp_ms: now_ms(),
            query: query.to_string(),
            completed: completed.to_string(),
            pattern: None,
            args: None,
            priority: None,
        }
    }
}

/// Returns the current wall-clock time in milliseconds.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for resolution log events.
pub trait LogSink: Send + Sync {
    /// Records a resolution event.
    fn record(&self, event: &ResolutionEvent);
}

// ============================================================================
// SECTION: Implementations
// ============================================================================

/// Log sink that writes JSON lines to stderr.
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn record(&self, event: &ResolutionEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Log sink that writes JSON lines to an arbitrary writer.
pub struct WriterLogSink {
    /// Writer guarded for concurrent resolutions.
    writer: Mutex<Box<dyn Write + Send>>,
}

impl WriterLogSink {
    /// Wraps a writer.
    #[must_use]
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Opens a log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl LogSink for WriterLogSink {
    fn record(&self, event: &ResolutionEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = writeln!(writer, "{payload}");
            let _ = writer.flush();
        }
    }
}

/// No-op log sink.
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn record(&self, _event: &ResolutionEvent) {}
}
