use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const REPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Schema version for compatibility
    pub version: String,

    /// When the batch was executed
    pub executed_at: DateTime<Utc>,

    /// Tool version that created this report
    pub tool_version: String,

    pub success_count: usize,

    pub failure_count: usize,

    /// Per-file failure messages, in batch order
    pub errors: Vec<String>,

    /// Files moved on disk, in execution order
    pub renames: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportEntry {
    /// Original absolute path
    pub from: PathBuf,

    /// Final absolute path, after collision handling
    pub to: PathBuf,
}
