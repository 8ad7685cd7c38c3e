use std::collections::BTreeMap;
use thiserror::Error;
use crate::core::EntityState;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no history entry recorded at move {index}")]
pub struct HistoryMissingError {
    pub index: usize,
}

/// Full entity snapshots keyed by move index.
///
/// Entry 0 is the state right after the stage loaded. Recording at an index
/// that already holds a snapshot overwrites it.
#[derive(Clone, Debug, Default)]
pub struct TraceHistory {
    entries: BTreeMap<usize, EntityState>,
}

impl TraceHistory {
    pub fn new(initial: EntityState) -> Self {
        let mut history = TraceHistory::default();
        history.record(0, initial);
        history
    }

    pub fn record(&mut self, index: usize, snapshot: EntityState) {
        self.entries.insert(index, snapshot);
    }

    pub fn get(&self, index: usize) -> Result<&EntityState, HistoryMissingError> {
        self.entries.get(&index).ok_or(HistoryMissingError { index })
    }

    pub fn max_recorded_index(&self) -> usize {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }

    /// Drops every entry above `index`, making that redo branch unreachable.
    pub fn discard_after(&mut self, index: usize) {
        self.entries.retain(|&i, _| i <= index);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
