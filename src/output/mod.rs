use crate::error::MAX_LISTED_ERRORS;
use crate::executor::BatchOutcome;
use crate::planner::PreviewEntry;
use std::io::{self, Write};

/// Display a preview (dry run) in a formatted output
pub fn display_preview(preview: &[PreviewEntry], writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Files: {}", preview.len())?;
    writeln!(writer)?;

    if preview.is_empty() {
        writeln!(writer, "No files to rename.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    for (i, entry) in preview.iter().enumerate() {
        writeln!(writer, "  {}. {}", i + 1, entry.original_name)?;
        writeln!(writer, "     -> {}", entry.new_name)?;
    }

    let unchanged = preview.iter().filter(|p| p.is_unchanged()).count();

    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(
        writer,
        "  {} files would be renamed",
        preview.len() - unchanged
    )?;
    if unchanged > 0 {
        writeln!(
            writer,
            "  {} names unchanged (these files still get a _N suffix)",
            unchanged
        )?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "Names that already exist get a _N suffix when renaming."
    )?;
    writeln!(writer, "Run without --dry to apply these changes.")?;

    Ok(())
}

/// Display a preview in a simple tab-separated format for scripting
pub fn display_preview_simple(preview: &[PreviewEntry], writer: &mut impl Write) -> io::Result<()> {
    for entry in preview {
        writeln!(writer, "{}\t{}", entry.original_name, entry.new_name)?;
    }
    Ok(())
}

/// Display execution results (non-dry-run)
pub fn display_execution_result(outcome: &BatchOutcome, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;

    if !outcome.has_failures() {
        writeln!(
            writer,
            "Successfully renamed {} files.",
            outcome.success_count
        )?;
        return Ok(());
    }

    writeln!(
        writer,
        "Renamed {} files, {} errors.",
        outcome.success_count, outcome.failure_count
    )?;

    for err in outcome.errors.iter().take(MAX_LISTED_ERRORS) {
        writeln!(writer, "  {}", err)?;
    }

    if outcome.errors.len() > MAX_LISTED_ERRORS {
        writeln!(
            writer,
            "  ... and {} more errors",
            outcome.errors.len() - MAX_LISTED_ERRORS
        )?;
    }

    Ok(())
}
