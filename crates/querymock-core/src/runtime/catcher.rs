// crates/querymock-core/src/runtime/catcher.rs
// ============================================================================
// Module: Query Mock Catcher
// Description: Mock registry, resolution, and query bookkeeping.
// Purpose: Pick the single best mock for each incoming statement.
// Dependencies: crate::core, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! The [`Catcher`] owns every registered [`MockEntry`] and two frequency
//! tables: queries received and queries that matched nothing. Resolution
//! normalizes the query, counts its completed form, stable-sorts the entries
//! (priority descending, then pattern length descending, then registration
//! order) and returns the first eligible match.
//! Invariants:
//! - Registration, reset, sorting, matching, and table updates all happen
//!   under the single registry lock.
//! - Reset clears entries and both tables together.
//! - No match yields [`Outcome::empty`], or [`ResolveError::NoMatch`] when
//!   panic-on-no-match is enabled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use thiserror::Error;

use crate::core::MockSpec;
use crate::core::Outcome;
use crate::core::Value;
use crate::core::complete_statement;
use crate::core::normalize;
use crate::interfaces::LogSink;
use crate::interfaces::ResolutionEvent;
use crate::interfaces::StderrLogSink;
use crate::runtime::entry::MockEntry;
use crate::runtime::entry::Triggered;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned by resolution.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No mock matched and panic-on-no-match is enabled.
    #[error("no mock matches query: {query}")]
    NoMatch {
        /// Normalized query text.
        query: String,
    },
}

// ============================================================================
// SECTION: Trigger Report
// ============================================================================

/// Result of checking expected trigger counts.
///
/// # Invariants
/// - `met` is true exactly when `mismatches` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerReport {
    /// All configured expectations hold.
    pub met: bool,
    /// One message per entry whose count differs from its expectation.
    pub mismatches: Vec<String>,
}

// ============================================================================
// SECTION: Registry State
// ============================================================================

/// State guarded by the registry lock.
#[derive(Debug, Default)]
struct Registry {
    /// Registered entries in registration order.
    mocks: Vec<Arc<MockEntry>>,
    /// Completed query text to receive count.
    received: BTreeMap<String, u64>,
    /// Completed query text to no-match count.
    unmatched: BTreeMap<String, u64>,
}

// ============================================================================
// SECTION: Catcher
// ============================================================================

/// Mock registry and resolver.
///
/// # Invariants
/// - Toggles take effect for the next resolution.
pub struct Catcher {
    /// Entries and frequency tables.
    registry: Mutex<Registry>,
    /// Emit one log event per resolution.
    logging: AtomicBool,
    /// Turn the empty default into [`ResolveError::NoMatch`].
    panic_on_no_match: AtomicBool,
    /// Destination for resolution events.
    sink: RwLock<Arc<dyn LogSink>>,
}

impl Default for Catcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Catcher {
    /// Creates an empty catcher logging to stderr when logging is enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            logging: AtomicBool::new(false),
            panic_on_no_match: AtomicBool::new(false),
            sink: RwLock::new(Arc::new(StderrLogSink)),
        }
    }

    /// Creates an empty catcher ready to share across statements.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Locks the registry.
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------------
    // Toggles
    // ------------------------------------------------------------------------

    /// Enables or disables resolution logging.
    pub fn set_logging(&self, enabled: bool) {
        self.logging.store(enabled, Ordering::SeqCst);
    }

    /// Returns true when resolution logging is enabled.
    #[must_use]
    pub fn logging(&self) -> bool {
        self.logging.load(Ordering::SeqCst)
    }

    /// Enables or disables failing resolutions that match nothing.
    pub fn set_panic_on_no_match(&self, enabled: bool) {
        self.panic_on_no_match.store(enabled, Ordering::SeqCst);
    }

    /// Returns true when unmatched resolutions fail.
    #[must_use]
    pub fn panic_on_no_match(&self) -> bool {
        self.panic_on_no_match.load(Ordering::SeqCst)
    }

    /// Replaces the log sink.
    pub fn set_log_sink(&self, sink: Arc<dyn LogSink>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = sink;
    }

    /// Records an event when logging is enabled.
    fn log(&self, event: impl FnOnce() -> ResolutionEvent) {
        if self.logging() {
            let sink = Arc::clone(&self.sink.read().unwrap_or_else(PoisonError::into_inner));
            sink.record(&event());
        }
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Appends fully specified mocks and returns their handles.
    pub fn attach(&self, specs: impl IntoIterator<Item = MockSpec>) -> Vec<Arc<MockEntry>> {
        let entries: Vec<Arc<MockEntry>> =
            specs.into_iter().map(|spec| Arc::new(MockEntry::from_spec(spec))).collect();
        self.registry().mocks.extend(entries.iter().cloned());
        entries
    }

    /// Appends a blank mock and returns it for fluent configuration.
    #[must_use]
    pub fn new_mock(&self) -> Arc<MockEntry> {
        let entry = Arc::new(MockEntry::default());
        self.registry().mocks.push(Arc::clone(&entry));
        entry
    }

    /// Removes every mock and clears both frequency tables.
    pub fn reset(&self) -> &Self {
        *self.registry() = Registry::default();
        self
    }

    /// Returns the registered mocks in registration order.
    #[must_use]
    pub fn mocks(&self) -> Vec<Arc<MockEntry>> {
        self.registry().mocks.clone()
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// Resolves a statement to the best matching mock's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] when nothing matches and
    /// panic-on-no-match is enabled.
    pub fn resolve(&self, query: &str, args: &[Value]) -> Result<Outcome, ResolveError> {
        let query = normalize(query);
        let completed = complete_statement(&query, args);

        let mut guard = self.registry();
        let registry = &mut *guard;
        *registry.received.entry(completed.clone()).or_insert(0) += 1;

        // Stable sort: entries with equal keys keep registration order.
        let mut ordered: Vec<&Arc<MockEntry>> = registry.mocks.iter().collect();
        ordered.sort_by_cached_key(|entry| Reverse(entry.sort_key()));
        let matched = ordered.into_iter().find_map(|entry| entry.try_trigger(&query, args));
        if matched.is_none() {
            *registry.unmatched.entry(completed.clone()).or_insert(0) += 1;
        }
        drop(guard);

        if let Some(Triggered {
            outcome,
            args: filter,
            priority,
        }) = matched
        {
            self.log(|| {
                ResolutionEvent::matched(
                    &query,
                    &completed,
                    outcome.pattern.as_deref().unwrap_or_default(),
                    filter,
                    priority,
                )
            });
            return Ok(outcome);
        }

        self.log(|| ResolutionEvent::unmatched(&query, &completed));
        if self.panic_on_no_match() {
            return Err(ResolveError::NoMatch {
                query,
            });
        }
        Ok(Outcome::empty())
    }

    // ------------------------------------------------------------------------
    // Bookkeeping
    // ------------------------------------------------------------------------

    /// Returns how many times the completed query was received.
    #[must_use]
    pub fn received_count(&self, completed: &str) -> u64 {
        self.registry().received.get(completed).copied().unwrap_or(0)
    }

    /// Returns how many times the completed query matched no mock.
    #[must_use]
    pub fn unmatched_count(&self, completed: &str) -> u64 {
        self.registry().unmatched.get(completed).copied().unwrap_or(0)
    }

    /// Checks every mock with an expected trigger count.
    #[must_use]
    pub fn check_trigger_expectations(&self) -> TriggerReport {
        let mismatches: Vec<String> =
            self.registry().mocks.iter().filter_map(|entry| entry.expectation_mismatch()).collect();
        TriggerReport {
            met: mismatches.is_empty(),
            mismatches,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
