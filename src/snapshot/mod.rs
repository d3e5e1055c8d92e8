// Snapshot management for replay navigation

use crate::memory::StackCollection;
use std::mem;

/// Average bytes budgeted per transcript line
const TRANSCRIPT_LINE_ESTIMATE: usize = 50;

/// Append-only log of performed moves
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript { lines: Vec::new() }
    }

    /// Record one line produced by instruction `step` (1-based)
    pub fn record(&mut self, text: String, step: usize) {
        self.lines.push(TranscriptLine { text, step });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A transcript line tagged with the instruction that produced it
#[derive(Debug, Clone)]
pub struct TranscriptLine {
    pub text: String,
    pub step: usize,
}

/// Crates moved by the step that produced a snapshot (0-based stack indices)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub source: usize,
    pub destination: usize,
    pub quantity: usize,
}

/// State of the yard after a number of applied instructions
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stacks: StackCollection,
    /// Instructions applied so far
    pub step: usize,
    /// Transcript lines visible at this point
    pub transcript_len: usize,
    pub last_move: Option<LastMove>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        mem::size_of::<Snapshot>()
            + self.stacks.estimated_size()
            + TRANSCRIPT_LINE_ESTIMATE
    }
}

/// Bounded history of snapshots
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
