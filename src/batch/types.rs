use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a path is refused when added to a batch
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Path is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Cannot resolve {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single file in the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File name without its extension
    pub stem: String,
    /// Extension including the leading dot, or empty
    pub extension: String,
}

impl FileEntry {
    pub fn new(path: PathBuf) -> Self {
        let (stem, extension) = split_name(&path);
        Self {
            path,
            stem,
            extension,
        }
    }

    /// Same file at a new location
    pub fn with_path(&self, path: PathBuf) -> Self {
        Self::new(path)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Split a path's file name into stem and dotted extension.
///
/// `archive.tar.gz` gives `("archive.tar", ".gz")`, `.bashrc` gives
/// `(".bashrc", "")`. A trailing dot is not an extension: `notes.` gives
/// `("notes.", "")`.
pub fn split_name(path: &Path) -> (String, String) {
    match path.extension().filter(|e| !e.is_empty()) {
        Some(extension) => (
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default(),
            format!(".{}", extension.to_string_lossy()),
        ),
        None => (
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            String::new(),
        ),
    }
}

/// Result of adding paths to a batch
#[derive(Debug, Default)]
pub struct AddSummary {
    pub added: usize,
    pub duplicates: usize,
    pub rejected: Vec<BatchError>,
}
