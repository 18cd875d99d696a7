mod codes;

pub use codes::ExitCode;

use crate::executor::ExecutorError;
use crate::report::ReportError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No files to rename")]
    NoFiles { rejected: Vec<String> },

    #[error("{failed} of {total} files could not be renamed")]
    PartialFailure { failed: usize, total: usize },

    #[error("Report error: {message}")]
    ReportError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    Other(String),
}

/// Failures listed in full before the rest are summarized
pub const MAX_LISTED_ERRORS: usize = 10;

impl AppError {
    /// Report failure that keeps the path it was writing to
    pub fn report(path: &Path, err: ReportError) -> Self {
        AppError::ReportError {
            path: Some(path.to_path_buf()),
            message: err.to_string(),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::NoFiles { .. } => ExitCode::NoFiles,
            AppError::PartialFailure { .. } => ExitCode::PartialFailure,
            AppError::ReportError { .. } => ExitCode::ReportError,
            AppError::InvalidArguments(_) => ExitCode::InvalidArguments,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::NoFiles { rejected } => {
                let mut msg = String::from("None of the given paths can be renamed.\n");
                if !rejected.is_empty() {
                    msg.push('\n');
                    for reason in rejected.iter().take(MAX_LISTED_ERRORS) {
                        msg.push_str(&format!("  - {}\n", reason));
                    }
                    if rejected.len() > MAX_LISTED_ERRORS {
                        msg.push_str(&format!(
                            "  ... and {} more\n",
                            rejected.len() - MAX_LISTED_ERRORS
                        ));
                    }
                }
                msg.push_str("\nPass one or more existing regular files.");
                msg
            }

            AppError::PartialFailure { failed, total } => format!(
                "Renamed {} of {} files. {} could not be renamed; \
                 see the list above.\n\n\
                 Check file permissions and ensure no files are open.",
                total - failed,
                total,
                failed
            ),

            AppError::ReportError { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Failed to write batch report:\n  {}\n{}\n\
                     The renames themselves were applied.",
                    message, path_info
                )
            }

            AppError::InvalidArguments(message) => message.clone(),

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ExecutorError> for AppError {
    fn from(err: ExecutorError) -> Self {
        let message = err.to_string();
        match err {
            ExecutorError::LengthMismatch { .. } => AppError::InvalidArguments(message),
            _ => AppError::Other(message),
        }
    }
}
