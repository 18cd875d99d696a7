//! UI module for styled terminal output.
//!
//! Provides colored output in normal mode and plain tracing in verbose mode.

use colored::Colorize;
use std::io::{self, Write};

use crate::progress::should_use_colors;

/// Capabilities of the terminal the UI draws on, decided once at startup
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub verbose: bool,
}

impl UiConfig {
    /// Create UI config from environment and args
    pub fn new(verbose: bool) -> Self {
        Self {
            colors_enabled: should_use_colors(),
            verbose,
        }
    }
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI with stderr output
    pub fn new(config: UiConfig) -> Self {
        // Set colored crate's global color setting
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer: Box::new(io::stderr()),
        }
    }

    /// Create UI with custom writer
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    /// Print the application header
    pub fn print_header(&mut self, version: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "quickrename".bright_cyan().bold(),
                format!("v{}", version).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "quickrename v{}", version);
        }
        let _ = writeln!(self.writer, "Type 'help' for a list of commands.");
    }

    /// Print a section header
    pub fn section(&mut self, title: &str) {
        if self.config.verbose {
            return;
        }
        let _ = writeln!(self.writer);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", title.bold());
        } else {
            let _ = writeln!(self.writer, "{}", title);
        }
    }

    /// Print an info message
    pub fn info(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.cyan());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a success message with checkmark
    pub fn success(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    /// Print a warning message
    pub fn warning(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    /// Print an error message
    pub fn error(&mut self, msg: &str) {
        // Errors shown in both modes
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "X {}", msg);
        }
    }

    /// Print a dim/muted message
    pub fn dim(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a key-value pair
    pub fn kv(&mut self, key: &str, value: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}: {}", key.bold(), value);
        } else {
            let _ = writeln!(self.writer, "{}: {}", key, value);
        }
    }

    /// Print a numbered preview row: `  n. from -> to`
    pub fn list_item(&mut self, position: usize, from: &str, to: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "  {} {} {} {}",
                format!("{:>3}.", position).dimmed(),
                from.dimmed(),
                "→".cyan(),
                to.bold()
            );
        } else {
            let _ = writeln!(self.writer, "  {:>3}. {} -> {}", position, from, to);
        }
    }

    /// Print a prompt without a trailing newline
    pub fn prompt(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = write!(self.writer, "{}", msg.bold());
        } else {
            let _ = write!(self.writer, "{}", msg);
        }
        let _ = self.writer.flush();
    }

    /// Print a blank line
    pub fn blank(&mut self) {
        if self.config.verbose {
            return;
        }
        let _ = writeln!(self.writer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn create_test_ui(verbose: bool) -> (Ui, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let config = UiConfig {
            colors_enabled: false,
            verbose,
        };
        let ui = Ui::with_writer(config, Box::new(TestWriter(buffer.clone())));
        (ui, buffer)
    }

    #[test]
    fn test_ui_plain_output() {
        let (mut ui, buffer) = create_test_ui(false);
        ui.success("Test success");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Test success"));
        assert!(output.contains("*")); // Plain checkmark
    }

    #[test]
    fn test_ui_list_item() {
        let (mut ui, buffer) = create_test_ui(false);
        ui.list_item(3, "a.txt", "file03.txt");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(output, "    3. a.txt -> file03.txt\n");
    }

    #[test]
    fn test_ui_verbose_mode_skips_decorations() {
        let (mut ui, buffer) = create_test_ui(true);
        ui.info("Should not appear");
        ui.section("Should not appear");
        ui.kv("Key", "Should not appear");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_ui_error_shown_in_verbose() {
        let (mut ui, buffer) = create_test_ui(true);
        ui.error("This error should appear");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("This error should appear"));
    }

    #[test]
    fn test_prompt_has_no_newline() {
        let (mut ui, buffer) = create_test_ui(false);
        ui.prompt("> ");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(output, "> ");
    }
}
