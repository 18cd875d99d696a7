mod types;

pub use types::*;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::executor::BatchOutcome;

/// Error types for report operations
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Build the report for an executed batch
pub fn create_report(outcome: &BatchOutcome) -> BatchReport {
    let renames = outcome
        .renamed()
        .map(|(from, to)| ReportEntry {
            from: from.clone(),
            to: to.clone(),
        })
        .collect();

    BatchReport {
        version: REPORT_VERSION.to_string(),
        executed_at: Utc::now(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        success_count: outcome.success_count,
        failure_count: outcome.failure_count,
        errors: outcome.errors.clone(),
        renames,
    }
}

/// Write a report for `outcome` to `path`
pub fn write_report(outcome: &BatchOutcome, path: &Path) -> Result<(), ReportError> {
    let report = create_report(outcome);
    write_report_file(&report, path)
}

pub fn write_report_file(report: &BatchReport, path: &Path) -> Result<(), ReportError> {
    // Write to temporary file first
    let temp_path = path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report)?;
    }

    // Atomic rename
    fs::rename(&temp_path, path)?;

    info!("Report written to: {:?}", path);

    Ok(())
}
