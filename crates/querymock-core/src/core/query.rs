// crates/querymock-core/src/core/query.rs
// ============================================================================
// Module: Query Mock Query Text
// Description: Query normalization, placeholder completion, command detection.
// Purpose: Canonicalize statement text for matching and bookkeeping.
// Dependencies: crate::core::value
// ============================================================================

//! ## Overview
//! [`normalize`] produces the canonical text used both when a pattern is
//! registered and when a query is resolved, so surface formatting never
//! affects matching. [`complete_statement`] substitutes positional
//! placeholders with rendered argument values; its output is a bookkeeping key
//! only and never feeds back into matching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::core::value::Value;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Trims the text and collapses every whitespace run into one space.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

// ============================================================================
// SECTION: Statement Completion
// ============================================================================

/// Replaces positional placeholders with the rendered argument values.
///
/// `?` placeholders are consumed left to right, one per argument, stopping
/// when either side runs out. Text without `?` falls back to numbered `$N`
/// placeholders (1-based); out-of-range indices stay verbatim.
#[must_use]
pub fn complete_statement(text: &str, args: &[Value]) -> String {
    if args.is_empty() {
        return text.to_string();
    }
    if text.contains('?') {
        return complete_question_marks(text, args);
    }
    if text.contains('$') {
        return complete_numbered(text, args);
    }
    text.to_string()
}

/// Substitutes `?` placeholders in order.
fn complete_question_marks(text: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut remaining = args.iter();
    for ch in text.chars() {
        if ch == '?'
            && let Some(arg) = remaining.next()
        {
            out.push_str(&arg.to_string());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Substitutes `$N` placeholders by index.
fn complete_numbered(text: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        let digits_start = start + ch.len_utf8();
        let mut digits_end = digits_start;
        while let Some(&(idx, next)) = chars.peek() {
            if !next.is_ascii_digit() {
                break;
            }
            digits_end = idx + next.len_utf8();
            chars.next();
        }
        let digits = &text[digits_start .. digits_end];
        let arg = digits
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| args.get(index));
        match arg {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str(&text[start .. digits_end]),
        }
    }
    out
}

// ============================================================================
// SECTION: Command Kind
// ============================================================================

/// Statement command derived from the first keyword of the statement text.
///
/// # Invariants
/// - `Other` carries the upper-cased keyword (empty for blank statements).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Row-returning read (`SELECT`, or a `WITH` CTE query).
    Select,
    /// Row insertion.
    Insert,
    /// Row update.
    Update,
    /// Row deletion.
    Delete,
    /// Any command the emulation does not recognize.
    Other(String),
}

impl CommandKind {
    /// Detects the command kind from the statement's first keyword.
    #[must_use]
    pub fn detect(query: &str) -> Self {
        let keyword = query
            .split(|ch: char| ch.is_whitespace() || ch == '(')
            .find(|word| !word.is_empty())
            .unwrap_or_default()
            .to_ascii_uppercase();
        match keyword.as_str() {
            "SELECT" | "WITH" => Self::Select,
            "INSERT" => Self::Insert,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            _ => Self::Other(keyword),
        }
    }

    /// Returns true for commands served through the read path.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::Select)
    }

    /// Returns the command keyword.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Other(keyword) => keyword,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
