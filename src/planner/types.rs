/// Sequential numbering rule.
///
/// `start_number` and `padding` are kept as the raw text the user typed;
/// the planner parses them on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialRule {
    pub enabled: bool,
    pub base_name: String,
    pub start_number: String,
    pub padding: String,
}

impl Default for SequentialRule {
    fn default() -> Self {
        Self {
            enabled: false,
            base_name: "file".to_string(),
            start_number: "1".to_string(),
            padding: "2".to_string(),
        }
    }
}

/// Text prepended or appended to the name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffixRule {
    pub enabled: bool,
    pub text: String,
}

impl AffixRule {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            enabled: true,
            text: text.into(),
        }
    }

    /// Text to apply, if the rule is on and non-empty
    pub fn active_text(&self) -> Option<&str> {
        if self.enabled && !self.text.is_empty() {
            Some(&self.text)
        } else {
            None
        }
    }
}

/// Active transformations for one preview or rename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    pub sequential: SequentialRule,
    pub prefix: AffixRule,
    pub suffix: AffixRule,
}

/// Original and proposed name of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub original_name: String,
    pub new_name: String,
}

impl PreviewEntry {
    pub fn is_unchanged(&self) -> bool {
        self.original_name == self.new_name
    }
}
