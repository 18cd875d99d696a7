use std::path::PathBuf;

use crate::batch::FileEntry;

/// Outcome of renaming a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    Failed { path: PathBuf, reason: String },
}

impl RenameOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RenameOutcome::Renamed { .. })
    }
}

/// One reversible rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoPair {
    pub original: PathBuf,
    pub renamed: PathBuf,
}

/// Renames made by the most recent batch, in execution order
#[derive(Debug, Clone, Default)]
pub struct UndoRecord {
    pairs: Vec<UndoPair>,
}

impl UndoRecord {
    pub fn push(&mut self, original: PathBuf, renamed: PathBuf) {
        self.pairs.push(UndoPair { original, renamed });
    }

    pub fn pairs(&self) -> &[UndoPair] {
        &self.pairs
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Remove and return all pairs
    pub fn take(&mut self) -> Vec<UndoPair> {
        std::mem::take(&mut self.pairs)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

/// Summary of one batch execution
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    /// `"<file name>: <reason>"` for each failure, in batch order
    pub errors: Vec<String>,
    /// One outcome per input entry, in batch order
    pub outcomes: Vec<RenameOutcome>,
    /// Input entries with successful renames pointing at their new paths
    pub entries: Vec<FileEntry>,
}

impl BatchOutcome {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            success_count: 0,
            failure_count: 0,
            errors: Vec::new(),
            outcomes: Vec::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }

    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Pairs of every file actually moved on disk
    pub fn renamed(&self) -> impl Iterator<Item = (&PathBuf, &PathBuf)> {
        self.outcomes.iter().filter_map(|o| match o {
            RenameOutcome::Renamed { from, to } => Some((from, to)),
            _ => None,
        })
    }
}
