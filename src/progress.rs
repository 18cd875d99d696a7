//! Progress output for user-facing status updates.
//!
//! Used by the executor while a batch runs. In verbose mode output is
//! suppressed since tracing covers the same events.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Progress {
    /// Create a progress reporter that respects UI mode
    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool, colors_enabled: bool) -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Create a reporter that prints nothing
    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report progress on a single rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report a file that could not be renamed
    pub fn rename_failed(&mut self, current: usize, total: usize, name: &str, reason: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                "✗".red().bold(),
                name,
                reason.red()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "[{}/{}] FAILED {}: {}",
                current, total, name, reason
            );
        }
    }

    /// Report an error during operation (non-fatal)
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    /// Report batch report file written
    pub fn report_written(&mut self, path: &std::path::Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Report saved to: {}", path.display()).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Report saved to: {}", path.display());
        }
    }

    /// Report starting an undo
    pub fn undo_start(&mut self, total: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Undoing last batch ({} files)", total).bold()
            );
        } else {
            let _ = writeln!(self.writer, "Undoing last batch ({} files)", total);
        }
    }

    /// Report progress on a single restore
    pub fn undo_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "↩".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} <- {}", current, total, to, from);
        }
    }

    /// Report undo complete
    pub fn undo_complete(&mut self, restored: usize, total: usize) {
        if self.silent {
            return;
        }
        let skipped = total.saturating_sub(restored);
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} files restored", restored).green()
            );
            if skipped > 0 {
                let _ = writeln!(
                    self.writer,
                    "{}",
                    format!("{} files could not be restored", skipped).yellow()
                );
            }
        } else {
            let _ = writeln!(self.writer, "Undo complete. {} files restored.", restored);
            if skipped > 0 {
                let _ = writeln!(self.writer, "{} files could not be restored.", skipped);
            }
        }
    }
}
