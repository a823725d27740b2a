// src/history.rs
use std::fmt::Write as _;

use crate::types::HistoryEntry;

/// Append-only per-run log of everything the operator has produced.
/// Diagnostic only: single owner (the operator), no eviction, gone on
/// restart.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order, oldest first.
    pub fn snapshot(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fixed-width table of the full log, printed after each tick.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>4}  {:>14}  {:>7}  {:>7}  {:>7}  {:>7}",
            "#", "ts_ms", "minute", "hour", "day", "wavg"
        );
        for (i, e) in self.entries.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>4}  {:>14}  {:>7.3}  {:>7.3}  {:>7.3}  {:>7.2}",
                i, e.ts_ms, e.minute, e.hour, e.day, e.weighted_average
            );
        }
        out
    }
}
