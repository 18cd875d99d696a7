use clap::Parser;
use std::path::PathBuf;

use crate::planner::{AffixRule, RuleConfig, SequentialRule};

#[derive(Parser, Debug)]
#[command(name = "quickrename")]
#[command(author, version, about, long_about = None)]
#[command(about = "Batch rename files with sequential numbering, prefixes and suffixes")]
pub struct Args {
    /// Files to rename, in order
    #[arg(required_unless_present = "interactive")]
    pub files: Vec<PathBuf>,

    /// Replace names with <BASE_NAME><number>
    #[arg(short, long)]
    pub sequential: bool,

    /// Base name for sequential numbering
    #[arg(short, long, default_value = "file")]
    pub base_name: String,

    /// First number for sequential numbering
    #[arg(long, default_value = "1", value_name = "N")]
    pub start: String,

    /// Minimum digits for sequential numbering (zero padded)
    #[arg(long, default_value = "2", value_name = "N")]
    pub padding: String,

    /// Text to add before each name
    #[arg(short, long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Text to add after each name, before the extension
    #[arg(short = 'x', long, value_name = "TEXT")]
    pub suffix: Option<String>,

    /// Show the planned names without renaming anything
    #[arg(short, long)]
    pub dry: bool,

    /// Print the dry run as tab-separated lines
    #[arg(long, requires = "dry")]
    pub plain: bool,

    /// Rename without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Start an interactive session
    #[arg(short, long, conflicts_with_all = ["dry", "yes", "report"])]
    pub interactive: bool,

    /// Write a JSON report of the executed batch
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Rule configuration described by the flags
    pub fn rule_config(&self) -> RuleConfig {
        RuleConfig {
            sequential: SequentialRule {
                enabled: self.sequential,
                base_name: self.base_name.clone(),
                start_number: self.start.clone(),
                padding: self.padding.clone(),
            },
            prefix: affix(self.prefix.as_deref()),
            suffix: affix(self.suffix.as_deref()),
        }
    }
}

fn affix(text: Option<&str>) -> AffixRule {
    text.map(AffixRule::with_text).unwrap_or_default()
}
