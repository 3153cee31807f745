//! Bounded undo/redo history over workspace snapshots.
//!
//! Snapshots are structural deep copies (`Clone` over plain owned data):
//! callers can never mutate stored history through their live working copy,
//! and nothing goes through a serializer on the way in or out. One `History`
//! value per editor session, one logical writer at a time.

use crate::config::HistoryConfig;
use crate::model::{GraphEdge, GraphNode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryState {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl HistoryState {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }
}

#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryState>,
    /// Index of the current entry; `entries.len()` is never 0 when this is
    /// in use, and `cursor < entries.len()` always holds after a push.
    cursor: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HistoryConfig::default().limit)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && !self.entries.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    /// Record a committed state. Any redo tail past the cursor is discarded;
    /// past the bound the oldest entry is evicted and the cursor shifts to
    /// keep pointing at the same logical entry.
    pub fn push(&mut self, state: &HistoryState) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(state.clone());
        self.cursor = self.entries.len() - 1;
        if self.entries.len() > self.limit {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one entry. `None` means nothing to undo; callers treat it
    /// as a no-op and typically disable the menu action.
    pub fn undo(&mut self) -> Option<HistoryState> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn redo(&mut self) -> Option<HistoryState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn current_state(&self) -> Option<HistoryState> {
        self.entries.get(self.cursor).cloned()
    }

    /// Reset to a single baseline entry.
    pub fn initialize(&mut self, state: &HistoryState) {
        self.clear();
        self.push(state);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
