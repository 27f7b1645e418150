use ringbuffer::{AllocRingBuffer, RingBuffer};

use super::grid::Grid;

/// Board state captured right before a successful move.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub grid: Grid,
    pub score: u32,
    pub moves_made: u32,
}

/// Bounded undo stack. Once full, pushing evicts the oldest entry.
pub struct UndoHistory {
    entries: AllocRingBuffer<HistoryEntry>,
}

impl UndoHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: AllocRingBuffer::new(capacity.max(1)),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.enqueue(entry);
    }

    /// Removes and returns the newest entry.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self.entries.drain().collect();
        let newest = entries.pop();
        for entry in entries {
            self.entries.enqueue(entry);
        }
        newest
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
