mod collision;
mod types;

pub use collision::{resolve_collision, MAX_COLLISION_ATTEMPTS};
pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::batch::FileEntry;
use crate::progress::Progress;

/// Errors raised while applying renames
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("No free name found for '{name}' after {attempts} attempts")]
    CollisionExhausted { name: String, attempts: usize },

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path has no parent directory: {0}")]
    NoParent(PathBuf),

    #[error("Got {names} names for {entries} files")]
    LengthMismatch { entries: usize, names: usize },
}

impl ExecutorError {
    /// Short reason used in per-file batch errors
    fn reason(&self) -> String {
        match self {
            ExecutorError::Rename { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

/// Applies previews to the filesystem and keeps the last batch for undo.
///
/// Calls take `&mut self`; a batch and its undo never overlap.
#[derive(Debug, Default)]
pub struct RenameExecutor {
    undo: UndoRecord,
}

impl RenameExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_record(&self) -> &UndoRecord {
        &self.undo
    }

    pub fn has_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Rename each entry to its proposed name, in order.
    ///
    /// A failing file is recorded and skipped; the remaining files are still
    /// processed. Only a length mismatch between the two inputs is an error.
    pub fn execute_batch(
        &mut self,
        entries: &[FileEntry],
        names: &[String],
    ) -> Result<BatchOutcome, ExecutorError> {
        self.execute_batch_with_progress(entries, names, &mut Progress::silent())
    }

    pub fn execute_batch_with_progress(
        &mut self,
        entries: &[FileEntry],
        names: &[String],
        progress: &mut Progress,
    ) -> Result<BatchOutcome, ExecutorError> {
        if entries.len() != names.len() {
            return Err(ExecutorError::LengthMismatch {
                entries: entries.len(),
                names: names.len(),
            });
        }

        self.undo.clear();

        let total = entries.len();
        let mut outcome = BatchOutcome::with_capacity(total);

        info!("Renaming {} files", total);

        for (i, (entry, name)) in entries.iter().zip(names).enumerate() {
            match self.rename_one(entry, name) {
                Ok(final_path) => {
                    let final_entry = entry.with_path(final_path.clone());
                    progress.rename_progress(
                        i + 1,
                        total,
                        &entry.file_name(),
                        &final_entry.file_name(),
                    );

                    outcome.success_count += 1;
                    outcome.outcomes.push(RenameOutcome::Renamed {
                        from: entry.path.clone(),
                        to: final_path,
                    });
                    outcome.entries.push(final_entry);
                }
                Err(e) => {
                    let reason = e.reason();
                    warn!("Failed to rename {:?}: {}", entry.path, reason);
                    progress.rename_failed(i + 1, total, &entry.file_name(), &reason);

                    outcome.failure_count += 1;
                    outcome
                        .errors
                        .push(format!("{}: {}", entry.file_name(), reason));
                    outcome.outcomes.push(RenameOutcome::Failed {
                        path: entry.path.clone(),
                        reason,
                    });
                    outcome.entries.push(entry.clone());
                }
            }
        }

        info!(
            succeeded = outcome.success_count,
            failed = outcome.failure_count,
            "Batch complete"
        );

        Ok(outcome)
    }

    fn rename_one(&mut self, entry: &FileEntry, name: &str) -> Result<PathBuf, ExecutorError> {
        let parent = entry
            .path
            .parent()
            .ok_or_else(|| ExecutorError::NoParent(entry.path.clone()))?;

        let resolved = resolve_collision(parent, name)?;
        let destination = parent.join(&resolved);

        move_file(&entry.path, &destination)?;
        info!("Renamed: {} -> {}", entry.file_name(), resolved);

        self.undo.push(entry.path.clone(), destination.clone());

        Ok(destination)
    }

    /// Reverse the last batch, most recent rename first.
    ///
    /// Files that are no longer at their renamed location are skipped, as are
    /// pairs whose original name has been taken again. The
    /// record is consumed, so a second call restores nothing. Returns how
    /// many files were restored.
    pub fn undo_last_batch(&mut self) -> usize {
        self.undo_last_batch_with_progress(&mut Progress::silent()).len()
    }

    /// Like [`undo_last_batch`](Self::undo_last_batch), returning the pairs
    /// that were actually restored.
    pub fn undo_last_batch_with_progress(&mut self, progress: &mut Progress) -> Vec<UndoPair> {
        let pairs = self.undo.take();
        if pairs.is_empty() {
            debug!("Nothing to undo");
            return Vec::new();
        }

        let total = pairs.len();
        progress.undo_start(total);

        let mut restored = Vec::with_capacity(total);
        for (i, pair) in pairs.into_iter().rev().enumerate() {
            if !pair.renamed.exists() {
                warn!("Cannot undo, file no longer exists: {:?}", pair.renamed);
                continue;
            }
            if pair.original.exists() {
                warn!("Cannot undo, original name is taken again: {:?}", pair.original);
                continue;
            }

            match move_file(&pair.renamed, &pair.original) {
                Ok(()) => {
                    info!("Restored: {:?} -> {:?}", pair.renamed, pair.original);
                    progress.undo_progress(
                        i + 1,
                        total,
                        &display_name(&pair.renamed),
                        &display_name(&pair.original),
                    );
                    restored.push(pair);
                }
                Err(e) => warn!("Undo skipped: {}", e),
            }
        }

        progress.undo_complete(restored.len(), total);

        restored
    }
}

fn move_file(from: &Path, to: &Path) -> Result<(), ExecutorError> {
    fs::rename(from, to).map_err(|source| ExecutorError::Rename {
        from: display_name(from),
        to: display_name(to),
        source,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
