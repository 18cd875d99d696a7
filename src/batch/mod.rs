mod types;

pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Ordered set of files queued for renaming
#[derive(Debug, Clone, Default)]
pub struct Batch {
    entries: Vec<FileEntry>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add files to the end of the batch.
    ///
    /// Only existing regular files are accepted. Paths are canonicalized so
    /// the same file reached through different spellings is added once.
    pub fn add_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> AddSummary {
        let mut summary = AddSummary::default();

        for path in paths {
            let path = path.as_ref();
            trace!(path = ?path, "Examining path");

            let absolute = match resolve_file(path) {
                Ok(p) => p,
                Err(e) => {
                    debug!(path = ?path, error = %e, "Rejected path");
                    summary.rejected.push(e);
                    continue;
                }
            };

            if self.contains(&absolute) {
                debug!(path = ?absolute, "Skipping duplicate");
                summary.duplicates += 1;
                continue;
            }

            debug!(path = ?absolute, "Added file");
            self.entries.push(FileEntry::new(absolute));
            summary.added += 1;
        }

        summary
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    /// Remove entries at the given positions. Returns how many were removed.
    pub fn remove(&mut self, indices: &[usize]) -> usize {
        let mut indices: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.entries.len())
            .collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        for &i in &indices {
            self.entries.remove(i);
        }

        indices.len()
    }

    /// Move each selected entry one place up. The first entry wraps to the end.
    pub fn move_up(&mut self, indices: &[usize]) {
        let len = self.entries.len();
        for (path, index) in self.selection(indices, false) {
            let target = if index == 0 { len } else { index - 1 };
            self.move_to(&path, target);
        }
    }

    /// Move each selected entry one place down. The last entry wraps to the front.
    pub fn move_down(&mut self, indices: &[usize]) {
        let len = self.entries.len();
        for (path, index) in self.selection(indices, true) {
            let target = if index + 1 == len { 0 } else { index + 1 };
            self.move_to(&path, target);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Swap in the entries produced by a rename run
    pub fn replace_entries(&mut self, entries: Vec<FileEntry>) {
        self.entries = entries;
    }

    /// Point the entry at `from` to `to`. Returns false if no entry matched.
    pub fn relocate(&mut self, from: &Path, to: &Path) -> bool {
        match self.entries.iter().position(|e| e.path == from) {
            Some(i) => {
                self.entries[i] = self.entries[i].with_path(to.to_path_buf());
                true
            }
            None => false,
        }
    }

    /// Snapshot the selected entries by identity, so later moves in the same
    /// pass follow the file rather than the slot.
    fn selection(&self, indices: &[usize], descending: bool) -> Vec<(PathBuf, usize)> {
        let mut indices: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.entries.len())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        if descending {
            indices.reverse();
        }

        indices
            .into_iter()
            .map(|i| (self.entries[i].path.clone(), i))
            .collect()
    }

    fn move_to(&mut self, path: &Path, target: usize) {
        if let Some(current) = self.entries.iter().position(|e| e.path == path) {
            let entry = self.entries.remove(current);
            let target = target.min(self.entries.len());
            self.entries.insert(target, entry);
        }
    }
}

fn resolve_file(path: &Path) -> Result<PathBuf, BatchError> {
    if !path.exists() {
        return Err(BatchError::NotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(BatchError::NotAFile(path.to_path_buf()));
    }

    fs::canonicalize(path).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}
