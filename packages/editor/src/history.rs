//! # Edit History
//!
//! Linear undo/redo over serialized-text snapshots.
//!
//! ## Design
//!
//! - The log is seeded with the initial snapshot and is never empty
//! - `entries[index]` is always the text currently displayed
//! - Recording truncates everything after `index` (no redo branches)
//! - Undo/redo only move the index; at either end they are no-ops
//! - An optional limit drops the oldest entries
//!
//! ## Example
//!
//! ```rust
//! use payload_editor::EditHistory;
//!
//! let mut history = EditHistory::new("{}");
//! history.record("{\"a\":1}");
//! assert_eq!(history.undo(), "{}");
//! assert_eq!(history.redo(), "{\"a\":1}");
//! ```

use std::sync::Arc;

/// Immutable text snapshot of the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry(Arc<str>);

impl HistoryEntry {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct EditHistory {
    entries: Vec<HistoryEntry>,

    /// Position of the displayed snapshot
    index: usize,

    /// Maximum number of entries kept (0 = unlimited)
    limit: usize,
}

impl EditHistory {
    /// Create a history seeded with the initial snapshot
    pub fn new(initial: impl Into<Arc<str>>) -> Self {
        Self::with_limit(initial, 0)
    }

    /// Create a history that keeps at most `limit` entries
    pub fn with_limit(initial: impl Into<Arc<str>>, limit: usize) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial)],
            index: 0,
            limit,
        }
    }

    /// Record a new snapshot, discarding any redo tail
    pub fn record(&mut self, snapshot: impl Into<Arc<str>>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry::new(snapshot));

        if self.limit > 0 && self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }

        self.index = self.entries.len() - 1;
    }

    /// Step back one snapshot and return it
    pub fn undo(&mut self) -> &str {
        if self.index > 0 {
            self.index -= 1;
        }
        self.current()
    }

    /// Step forward one snapshot and return it
    pub fn redo(&mut self) -> &str {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
        }
        self.current()
    }

    pub fn current(&self) -> &str {
        self.entries[self.index].as_str()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the log holds at least the initial snapshot
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
