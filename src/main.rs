use std::io::{self, BufRead};

use clap::Parser;
use quickrename::cli::Args;
use quickrename::error::AppError;
use quickrename::executor::RenameExecutor;
use quickrename::output::{display_execution_result, display_preview, display_preview_simple};
use quickrename::planner::{self, PreviewEntry};
use quickrename::progress::Progress;
use quickrename::report::write_report;
use quickrename::session::{Command, Session};
use quickrename::ui::{Ui, UiConfig};
use quickrename::{logging, Batch};
use tracing::{debug, error, info, warn};

fn main() {
    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let verbose = args.verbose > 0;
    let ui_config = UiConfig::new(verbose);
    let mut progress = Progress::new_with_ui(verbose, ui_config.colors_enabled);

    if args.interactive {
        info!("Starting interactive session");
        let mut session =
            Session::new(Ui::new(ui_config), progress).with_rules(args.rule_config());
        if !args.files.is_empty() {
            session.execute(Command::Add(args.files.clone()));
        }
        return session.run(io::stdin().lock());
    }

    // Step 1: Load files
    let mut batch = Batch::new();
    let summary = batch.add_paths(&args.files);
    for rejected in &summary.rejected {
        warn!("{}", rejected);
        progress.warn(&rejected.to_string());
    }

    if batch.is_empty() {
        return Err(AppError::NoFiles {
            rejected: summary.rejected.iter().map(|e| e.to_string()).collect(),
        });
    }

    info!("Loaded {} files", batch.len());

    // Step 2: Plan names
    let rules = args.rule_config();
    debug!(?rules, "Rule configuration");
    let preview = planner::preview(batch.entries(), &rules);

    if args.dry {
        let mut stdout = io::stdout();
        let shown = if args.plain {
            display_preview_simple(&preview, &mut stdout)
        } else {
            display_preview(&preview, &mut stdout)
        };
        shown.map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
        return Ok(());
    }

    // Step 3: Confirm
    let mut ui = Ui::new(ui_config);
    if !args.yes && !confirm(&mut ui, &preview, &mut io::stdin().lock()) {
        ui.info("Cancelled, no files were renamed.");
        return Ok(());
    }

    // Step 4: Rename
    let names: Vec<String> = preview.into_iter().map(|p| p.new_name).collect();
    let mut executor = RenameExecutor::new();
    let outcome = executor.execute_batch_with_progress(batch.entries(), &names, &mut progress)?;

    display_execution_result(&outcome, &mut io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    if let Some(report_path) = &args.report {
        write_report(&outcome, report_path).map_err(|e| AppError::report(report_path, e))?;
        progress.report_written(report_path);
    }

    if outcome.has_failures() {
        return Err(AppError::PartialFailure {
            failed: outcome.failure_count,
            total: outcome.total(),
        });
    }

    Ok(())
}

/// Show the planned names and ask before touching the filesystem
fn confirm(ui: &mut Ui, preview: &[PreviewEntry], input: &mut impl BufRead) -> bool {
    ui.section(&format!("Preview ({} files)", preview.len()));
    for (i, entry) in preview.iter().enumerate() {
        ui.list_item(i + 1, &entry.original_name, &entry.new_name);
    }
    ui.blank();
    ui.prompt(&format!(
        "Are you sure you want to rename {} files? [y/N] ",
        preview.len()
    ));

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            warn!("Failed to read confirmation: {}", e);
            false
        }
    }
}
