pub mod batch;
pub mod cli;
pub mod error;
pub mod executor;
pub mod logging;
pub mod output;
pub mod planner;
pub mod progress;
pub mod report;
pub mod session;
pub mod ui;

pub use batch::{AddSummary, Batch, BatchError, FileEntry};
pub use error::{AppError, ExitCode};
pub use executor::{
    resolve_collision, BatchOutcome, ExecutorError, RenameExecutor, RenameOutcome, UndoPair,
    UndoRecord,
};
pub use planner::{
    compute_name, preview, preview_names, AffixRule, PreviewEntry, RuleConfig, SequentialRule,
};
