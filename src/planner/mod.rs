mod types;

pub use types::*;

use crate::batch::FileEntry;
use tracing::{debug, trace};

/// Widest zero padding accepted; matches the common filename length limit
pub const MAX_PADDING: usize = 255;

/// Compute the proposed file name for one entry.
///
/// `index` is the entry's current 0-based position in the batch. Invalid
/// numeric input never fails: it falls back to `base_name` followed by
/// `index + 1`.
pub fn compute_name(entry: &FileEntry, index: usize, config: &RuleConfig) -> String {
    let mut name = if config.sequential.enabled {
        sequential_base(&config.sequential, index)
    } else {
        entry.stem.clone()
    };

    if let Some(prefix) = config.prefix.active_text() {
        name.insert_str(0, prefix);
    }

    if let Some(suffix) = config.suffix.active_text() {
        name.push_str(suffix);
    }

    name.push_str(&entry.extension);

    trace!(index, from = %entry.file_name(), to = %name, "Computed name");

    name
}

/// Compute the full preview for a batch, in current order
pub fn preview(entries: &[FileEntry], config: &RuleConfig) -> Vec<PreviewEntry> {
    debug!(count = entries.len(), "Computing preview");

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| PreviewEntry {
            original_name: entry.file_name(),
            new_name: compute_name(entry, index, config),
        })
        .collect()
}

/// Proposed names only, index-aligned with `entries`
pub fn preview_names(entries: &[FileEntry], config: &RuleConfig) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| compute_name(entry, index, config))
        .collect()
}

fn sequential_base(rule: &SequentialRule, index: usize) -> String {
    match parse_numbering(rule, index) {
        Some((number, padding)) => {
            format!("{}{:0width$}", rule.base_name, number, width = padding)
        }
        None => {
            debug!(
                start = %rule.start_number,
                padding = %rule.padding,
                "Invalid numbering, using position"
            );
            format!("{}{}", rule.base_name, index + 1)
        }
    }
}

fn parse_numbering(rule: &SequentialRule, index: usize) -> Option<(u64, usize)> {
    let start: u64 = rule.start_number.trim().parse().ok()?;
    let padding: usize = rule.padding.trim().parse().ok()?;

    if padding > MAX_PADDING {
        return None;
    }

    let number = start.checked_add(u64::try_from(index).ok()?)?;

    Some((number, padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str) -> FileEntry {
        FileEntry::new(PathBuf::from("/photos").join(name))
    }

    fn sequential(base: &str, start: &str, padding: &str) -> RuleConfig {
        RuleConfig {
            sequential: SequentialRule {
                enabled: true,
                base_name: base.to_string(),
                start_number: start.to_string(),
                padding: padding.to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_no_rules_keeps_name() {
        let config = RuleConfig::default();
        assert_eq!(compute_name(&entry("IMG_0042.JPG"), 5, &config), "IMG_0042.JPG");
    }

    #[test]
    fn test_prefix_and_suffix() {
        let config = RuleConfig {
            prefix: AffixRule::with_text("trip-"),
            suffix: AffixRule::with_text("_final"),
            ..Default::default()
        };

        assert_eq!(
            compute_name(&entry("Beach Day.png"), 0, &config),
            "trip-Beach Day_final.png"
        );
    }

    #[test]
    fn test_empty_affix_is_ignored() {
        let config = RuleConfig {
            prefix: AffixRule::with_text(""),
            suffix: AffixRule::with_text(""),
            ..Default::default()
        };

        assert_eq!(compute_name(&entry("notes.txt"), 0, &config), "notes.txt");
    }

    #[test]
    fn test_disabled_affix_is_ignored() {
        let config = RuleConfig {
            prefix: AffixRule {
                enabled: false,
                text: "x".to_string(),
            },
            ..Default::default()
        };

        assert_eq!(compute_name(&entry("notes.txt"), 0, &config), "notes.txt");
    }

    #[test]
    fn test_sequential_padded() {
        let config = sequential("file", "1", "2");

        let bases: Vec<String> = (0..10)
            .map(|i| compute_name(&entry("x.txt"), i, &config))
            .collect();

        assert_eq!(bases[0], "file01.txt");
        assert_eq!(bases[8], "file09.txt");
        assert_eq!(bases[9], "file10.txt");
    }

    #[test]
    fn test_sequential_not_truncated() {
        let config = sequential("file", "1", "2");
        assert_eq!(compute_name(&entry("x.txt"), 99, &config), "file100.txt");
    }

    #[test]
    fn test_sequential_zero_padding() {
        let config = sequential("img", "7", "0");
        assert_eq!(compute_name(&entry("x.jpg"), 3, &config), "img10.jpg");
    }

    #[test]
    fn test_sequential_accepts_whitespace() {
        let config = sequential("img", " 5 ", " 3");
        assert_eq!(compute_name(&entry("x.jpg"), 0, &config), "img005.jpg");
    }

    #[test]
    fn test_invalid_padding_falls_back() {
        let config = sequential("file", "10", "abc");

        for i in 0..5 {
            assert_eq!(
                compute_name(&entry("x.txt"), i, &config),
                format!("file{}.txt", i + 1)
            );
        }
    }

    #[test]
    fn test_invalid_start_falls_back() {
        let config = sequential("file", "one", "3");
        assert_eq!(compute_name(&entry("x.txt"), 2, &config), "file3.txt");
    }

    #[test]
    fn test_negative_start_falls_back() {
        let config = sequential("file", "-4", "3");
        assert_eq!(compute_name(&entry("x.txt"), 0, &config), "file1.txt");
    }

    #[test]
    fn test_oversized_padding_falls_back() {
        let config = sequential("file", "1", "100000");
        assert_eq!(compute_name(&entry("x.txt"), 0, &config), "file1.txt");
    }

    #[test]
    fn test_overflow_falls_back() {
        let config = sequential("file", &u64::MAX.to_string(), "1");
        assert_eq!(compute_name(&entry("x.txt"), 1, &config), "file2.txt");
    }

    #[test]
    fn test_sequential_with_affixes_keeps_extension() {
        let mut config = sequential("shot", "1", "3");
        config.prefix = AffixRule::with_text("2024_");
        config.suffix = AffixRule::with_text("-edit");

        assert_eq!(
            compute_name(&entry("DSC1234.tar.gz"), 1, &config),
            "2024_shot002-edit.gz"
        );
    }

    #[test]
    fn test_no_extension() {
        let config = sequential("doc", "1", "1");
        assert_eq!(compute_name(&entry("README"), 0, &config), "doc1");
    }

    #[test]
    fn test_trailing_dot_is_not_an_extension() {
        let config = sequential("file", "1", "2");
        assert_eq!(compute_name(&entry("notes."), 0, &config), "file01");
        assert_eq!(
            compute_name(&entry("notes."), 0, &RuleConfig::default()),
            "notes."
        );
    }

    #[test]
    fn test_preview_matches_entry_count() {
        let entries = vec![entry("a.txt"), entry("b.txt"), entry("c.txt")];
        let config = sequential("f", "1", "1");

        let result = preview(&entries, &config);

        assert_eq!(result.len(), entries.len());
        assert_eq!(result[0].original_name, "a.txt");
        assert_eq!(result[0].new_name, "f1.txt");
        assert_eq!(result[2].new_name, "f3.txt");
    }

    #[test]
    fn test_preview_is_idempotent() {
        let entries = vec![entry("a.txt"), entry("b.md")];
        let mut config = sequential("f", "3", "2");
        config.suffix = AffixRule::with_text("_x");

        assert_eq!(preview(&entries, &config), preview(&entries, &config));
    }

    #[test]
    fn test_preview_uses_current_order() {
        let mut entries = vec![entry("a.txt"), entry("b.txt")];
        let config = sequential("f", "1", "1");

        entries.swap(0, 1);
        let result = preview(&entries, &config);

        assert_eq!(result[0].original_name, "b.txt");
        assert_eq!(result[0].new_name, "f1.txt");
    }

    #[test]
    fn test_preview_names_aligned() {
        let entries = vec![entry("a.txt"), entry("b.txt")];
        let config = sequential("f", "1", "1");

        let names = preview_names(&entries, &config);
        let full = preview(&entries, &config);

        assert_eq!(names.len(), full.len());
        for (name, p) in names.iter().zip(&full) {
            assert_eq!(name, &p.new_name);
        }
    }

    #[test]
    fn test_unchanged_detection() {
        let entries = vec![entry("a.txt")];
        let result = preview(&entries, &RuleConfig::default());
        assert!(result[0].is_unchanged());
    }
}
