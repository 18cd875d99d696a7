//! Interactive session: a line-oriented shell over a batch.
//!
//! Files can be added, reordered and removed, rules changed, and the
//! preview refreshed after every change. `rename` applies the preview and
//! `undo` reverts the most recent rename.

use std::io::BufRead;
use std::path::PathBuf;
use tracing::debug;

use crate::batch::Batch;
use crate::error::{AppError, MAX_LISTED_ERRORS};
use crate::executor::{BatchOutcome, RenameExecutor};
use crate::planner::{self, AffixRule, RuleConfig};
use crate::progress::Progress;
use crate::ui::Ui;

const HELP: &[(&str, &str)] = &[
    ("add <path>...", "add files (quote paths with spaces)"),
    ("remove <n>...", "remove files at positions"),
    ("up <n>... / down <n>...", "move files one place"),
    ("clear", "remove all files"),
    ("list", "show the preview"),
    ("seq on|off", "toggle sequential numbering"),
    ("base <name>", "base name for numbering"),
    ("start <n>", "first number"),
    ("pad <n>", "minimum digits"),
    ("prefix <text>|off", "set or disable the prefix"),
    ("suffix <text>|off", "set or disable the suffix"),
    ("rules", "show active rules"),
    ("rename", "apply the preview"),
    ("undo", "revert the last rename"),
    ("quit", "leave the session"),
];

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<PathBuf>),
    Remove(Vec<usize>),
    Up(Vec<usize>),
    Down(Vec<usize>),
    Clear,
    Preview,
    Rules,
    Sequential(bool),
    BaseName(String),
    Start(String),
    Padding(String),
    Prefix(Option<String>),
    Suffix(Option<String>),
    Rename,
    Undo,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "add" => {
                let paths = split_args(rest)?;
                if paths.is_empty() {
                    return Err("Expected one or more file paths".to_string());
                }
                Command::Add(paths.into_iter().map(PathBuf::from).collect())
            }
            "remove" | "rm" => Command::Remove(positions(rest)?),
            "up" => Command::Up(positions(rest)?),
            "down" => Command::Down(positions(rest)?),
            "clear" => Command::Clear,
            "list" | "ls" | "preview" => Command::Preview,
            "rules" => Command::Rules,
            "seq" => Command::Sequential(on_off(rest)?),
            "base" => Command::BaseName(unquote(rest).to_string()),
            "start" => Command::Start(rest.to_string()),
            "pad" | "padding" => Command::Padding(rest.to_string()),
            "prefix" => Command::Prefix(affix_arg(rest)),
            "suffix" => Command::Suffix(affix_arg(rest)),
            "rename" | "apply" => Command::Rename,
            "undo" => Command::Undo,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(format!(
                    "Unknown command '{}'. Type 'help' for a list of commands.",
                    other
                ))
            }
        };

        Ok(Some(command))
    }
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    batch: Batch,
    rules: RuleConfig,
    executor: RenameExecutor,
    ui: Ui,
    progress: Progress,
}

impl Session {
    pub fn new(ui: Ui, progress: Progress) -> Self {
        Self {
            batch: Batch::new(),
            rules: RuleConfig::default(),
            executor: RenameExecutor::new(),
            ui,
            progress,
        }
    }

    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Read commands until `quit` or end of input
    pub fn run(&mut self, input: impl BufRead) -> Result<(), AppError> {
        self.ui.print_header(env!("CARGO_PKG_VERSION"));

        let mut lines = input.lines();
        loop {
            self.ui.prompt("> ");

            let line = match lines.next() {
                Some(line) => line
                    .map_err(|e| AppError::Other(format!("Failed to read input: {}", e)))?,
                None => break,
            };

            match Command::parse(&line) {
                Ok(Some(command)) => {
                    if self.execute(command) == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(message) => self.ui.error(&message),
            }
        }

        self.ui.blank();
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Flow {
        debug!(?command, "Executing command");

        match command {
            Command::Add(paths) => self.add(&paths),
            Command::Remove(positions) => {
                let removed = self.batch.remove(&to_indices(&positions));
                self.ui.info(&format!(
                    "Removed {} files. Total: {} files",
                    removed,
                    self.batch.len()
                ));
                self.show_preview();
            }
            Command::Up(positions) => {
                self.batch.move_up(&to_indices(&positions));
                self.show_preview();
            }
            Command::Down(positions) => {
                self.batch.move_down(&to_indices(&positions));
                self.show_preview();
            }
            Command::Clear => {
                self.batch.clear();
                self.ui.info("Cleared all files");
            }
            Command::Preview => self.show_preview(),
            Command::Rules => self.show_rules(),
            Command::Sequential(enabled) => {
                self.rules.sequential.enabled = enabled;
                self.show_preview();
            }
            Command::BaseName(name) => {
                self.rules.sequential.base_name = name;
                self.show_preview();
            }
            Command::Start(start) => {
                self.rules.sequential.start_number = start;
                self.show_preview();
            }
            Command::Padding(padding) => {
                self.rules.sequential.padding = padding;
                self.show_preview();
            }
            Command::Prefix(text) => {
                set_affix(&mut self.rules.prefix, text);
                self.show_preview();
            }
            Command::Suffix(text) => {
                set_affix(&mut self.rules.suffix, text);
                self.show_preview();
            }
            Command::Rename => self.rename(),
            Command::Undo => self.undo(),
            Command::Help => {
                for (usage, description) in HELP {
                    self.ui.kv(&format!("{:<24}", usage), description);
                }
            }
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    fn add(&mut self, paths: &[PathBuf]) {
        let summary = self.batch.add_paths(paths);

        for rejected in &summary.rejected {
            self.ui.warning(&rejected.to_string());
        }
        if summary.duplicates > 0 {
            self.ui
                .dim(&format!("{} files already in the list", summary.duplicates));
        }

        self.ui.info(&format!(
            "Added {} files. Total: {} files",
            summary.added,
            self.batch.len()
        ));
        self.show_preview();
    }

    fn rename(&mut self) {
        if self.batch.is_empty() {
            self.ui.warning("Please add files to rename first.");
            return;
        }

        let names = planner::preview_names(self.batch.entries(), &self.rules);
        let outcome =
            match self
                .executor
                .execute_batch_with_progress(self.batch.entries(), &names, &mut self.progress)
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.ui.error(&e.to_string());
                    return;
                }
            };

        let BatchOutcome {
            success_count,
            failure_count,
            errors,
            entries,
            ..
        } = outcome;

        self.batch.replace_entries(entries);

        if failure_count == 0 {
            self.ui
                .success(&format!("Successfully renamed {} files", success_count));
        } else {
            self.ui.warning(&format!(
                "Renamed {} files, {} errors",
                success_count, failure_count
            ));
            for err in errors.iter().take(MAX_LISTED_ERRORS) {
                self.ui.error(err);
            }
            if errors.len() > MAX_LISTED_ERRORS {
                self.ui.dim(&format!(
                    "... and {} more errors",
                    errors.len() - MAX_LISTED_ERRORS
                ));
            }
        }

        self.show_preview();
    }

    fn undo(&mut self) {
        if !self.executor.has_undo() {
            self.ui.warning("Nothing to undo");
            return;
        }

        let restored = self
            .executor
            .undo_last_batch_with_progress(&mut self.progress);

        for pair in &restored {
            self.batch.relocate(&pair.renamed, &pair.original);
        }

        self.ui.success(&format!("Restored {} files", restored.len()));
        self.show_preview();
    }

    fn show_preview(&mut self) {
        if self.batch.is_empty() {
            self.ui.dim("No files loaded.");
            return;
        }

        let preview = planner::preview(self.batch.entries(), &self.rules);

        self.ui.section(&format!("Preview ({} files)", preview.len()));
        for (i, entry) in preview.iter().enumerate() {
            self.ui
                .list_item(i + 1, &entry.original_name, &entry.new_name);
        }
    }

    fn show_rules(&mut self) {
        let seq = &self.rules.sequential;
        let sequential = if seq.enabled {
            format!(
                "on (base '{}', start {}, padding {})",
                seq.base_name, seq.start_number, seq.padding
            )
        } else {
            "off".to_string()
        };

        self.ui.kv("Sequential", &sequential);
        self.ui.kv("Prefix", &describe_affix(&self.rules.prefix));
        self.ui.kv("Suffix", &describe_affix(&self.rules.suffix));
    }
}

fn set_affix(rule: &mut AffixRule, text: Option<String>) {
    match text {
        Some(text) => *rule = AffixRule::with_text(text),
        None => rule.enabled = false,
    }
}

fn describe_affix(rule: &AffixRule) -> String {
    match rule.active_text() {
        Some(text) => format!("'{}'", text),
        None => "off".to_string(),
    }
}

fn to_indices(positions: &[usize]) -> Vec<usize> {
    positions.iter().filter_map(|p| p.checked_sub(1)).collect()
}

fn positions(rest: &str) -> Result<Vec<usize>, String> {
    let positions = rest
        .split_whitespace()
        .map(|token| match token.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!(
                "Invalid position '{}' (positions start at 1)",
                token
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if positions.is_empty() {
        return Err("Expected one or more positions".to_string());
    }

    Ok(positions)
}

fn on_off(rest: &str) -> Result<bool, String> {
    match rest.to_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        _ => Err(format!("Expected 'on' or 'off', got '{}'", rest)),
    }
}

fn affix_arg(rest: &str) -> Option<String> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("off") {
        None
    } else {
        Some(unquote(rest).to_string())
    }
}

/// Strip one pair of surrounding double quotes
fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

/// Split on whitespace, keeping double-quoted runs together
fn split_args(input: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err("Unterminated quote".to_string());
    }
    if has_token {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiConfig;
    use std::fs;
    use std::io::{self, Cursor, Write};
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn create_test_session() -> (Session, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let config = UiConfig {
            colors_enabled: false,
            verbose: false,
        };
        let ui = Ui::with_writer(config, Box::new(TestWriter(buffer.clone())));
        (Session::new(ui, Progress::silent()), buffer)
    }

    fn output(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("# note").unwrap(), None);
        assert_eq!(Command::parse("rename").unwrap(), Some(Command::Rename));
        assert_eq!(Command::parse("SEQ on").unwrap(), Some(Command::Sequential(true)));
        assert_eq!(
            Command::parse("remove 3 1").unwrap(),
            Some(Command::Remove(vec![3, 1]))
        );
        assert_eq!(
            Command::parse("pad abc").unwrap(),
            Some(Command::Padding("abc".to_string()))
        );
        assert_eq!(Command::parse("prefix off").unwrap(), Some(Command::Prefix(None)));
        assert_eq!(
            Command::parse("suffix \" v2\"").unwrap(),
            Some(Command::Suffix(Some(" v2".to_string())))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("remove 0").is_err());
        assert!(Command::parse("up x").is_err());
        assert!(Command::parse("down").is_err());
        assert!(Command::parse("seq maybe").is_err());
        assert!(Command::parse("add").is_err());
        assert!(Command::parse("add \"unterminated").is_err());
    }

    #[test]
    fn test_split_args_quotes() {
        assert_eq!(
            split_args(r#"a.txt "my file.txt"  b"#).unwrap(),
            vec!["a.txt", "my file.txt", "b"]
        );
        assert_eq!(split_args(r#""""#).unwrap(), vec![""]);
    }

    #[test]
    fn test_session_rename_and_undo() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let (mut session, buffer) = create_test_session();
        let script = format!(
            "add \"{}\" \"{}\"\nseq on\nbase pic\nrename\nundo\nquit\n",
            dir.path().join("a.txt").display(),
            dir.path().join("b.txt").display()
        );

        session.run(Cursor::new(script)).unwrap();

        let out = output(&buffer);
        assert!(out.contains("Added 2 files. Total: 2 files"));
        assert!(out.contains("a.txt -> pic01.txt"));
        assert!(out.contains("Successfully renamed 2 files"));
        assert!(out.contains("Restored 2 files"));

        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "a");
        assert!(!dir.path().join("pic01.txt").exists());
        // list follows the files back to their original names
        assert_eq!(session.batch().entries()[0].file_name(), "a.txt");
    }

    #[test]
    fn test_session_rename_updates_list() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let (mut session, _buffer) = create_test_session();
        session.execute(Command::Add(vec![dir.path().join("a.txt")]));
        session.execute(Command::Prefix(Some("new_".to_string())));
        session.execute(Command::Rename);

        assert_eq!(session.batch().entries()[0].file_name(), "new_a.txt");
        assert!(dir.path().join("new_a.txt").exists());
    }

    #[test]
    fn test_session_reports_failures() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let (mut session, buffer) = create_test_session();
        session.execute(Command::Add(vec![
            dir.path().join("a.txt"),
            dir.path().join("b.txt"),
        ]));
        fs::remove_file(dir.path().join("a.txt")).unwrap();
        session.execute(Command::Suffix(Some("_x".to_string())));
        session.execute(Command::Rename);

        let out = output(&buffer);
        assert!(out.contains("Renamed 1 files, 1 errors"));
        assert!(out.contains("X a.txt: "));
        assert!(dir.path().join("b_x.txt").exists());
    }

    #[test]
    fn test_session_undo_without_rename() {
        let (mut session, buffer) = create_test_session();
        session.execute(Command::Undo);

        assert!(output(&buffer).contains("Nothing to undo"));
    }

    #[test]
    fn test_session_rename_empty_batch() {
        let (mut session, buffer) = create_test_session();
        session.execute(Command::Rename);

        assert!(output(&buffer).contains("Please add files"));
    }

    #[test]
    fn test_session_reorder_changes_numbering() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let (mut session, _buffer) = create_test_session();
        session.execute(Command::Add(vec![
            dir.path().join("a.txt"),
            dir.path().join("b.txt"),
        ]));
        session.execute(Command::Sequential(true));
        session.execute(Command::Down(vec![1]));
        session.execute(Command::Rename);

        assert_eq!(fs::read_to_string(dir.path().join("file01.txt")).unwrap(), "b");
        assert_eq!(fs::read_to_string(dir.path().join("file02.txt")).unwrap(), "a");
    }

    #[test]
    fn test_session_rules_output() {
        let (mut session, buffer) = create_test_session();
        session.execute(Command::Sequential(true));
        session.execute(Command::Prefix(Some("x_".to_string())));
        session.execute(Command::Rules);

        let out = output(&buffer);
        assert!(out.contains("Sequential: on (base 'file', start 1, padding 2)"));
        assert!(out.contains("Prefix: 'x_'"));
        assert!(out.contains("Suffix: off"));
        assert!(session.rules().prefix.enabled);
    }

    #[test]
    fn test_session_reports_unknown_command() {
        let (mut session, buffer) = create_test_session();
        session.run(Cursor::new("bogus\n")).unwrap();

        assert!(output(&buffer).contains("Unknown command 'bogus'"));
    }
}
