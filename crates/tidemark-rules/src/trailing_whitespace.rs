//! Rule forbidding whitespace at the end of lines.
//!
//! # Configuration
//!
//! - `ignores_empty_lines`: Skip lines made only of whitespace (default: false)

use tidemark_core::{Location, Rule, RuleConfig, RuleDescriptor, Severity, SourceUnit, Violation};

/// Rule identifier for trailing-whitespace.
pub const IDENTIFIER: &str = "trailing_whitespace";

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    identifier: IDENTIFIER,
    name: "Trailing Whitespace",
    description: "Lines should not have trailing whitespace.",
    non_triggering_examples: &["let name: String\n", "//\n", "// \u{a0}comment\n"],
    triggering_examples: &[
        "let name: String↓ \n",
        "/* */ let name: String↓\t\n",
        "let a = 1\n↓  \nlet b = 2\n",
    ],
};

/// Forbids trailing spaces and tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingWhitespace;

impl TrailingWhitespace {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

impl Rule for TrailingWhitespace {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DESCRIPTOR
    }

    fn validate(&self, unit: &SourceUnit, config: &RuleConfig) -> Vec<Violation> {
        let ignores_empty_lines = config.get_bool("ignores_empty_lines", false);

        unit.lines()
            .iter()
            .filter_map(|line| {
                let trimmed = line.text.trim_end_matches(is_blank);
                if trimmed.len() == line.text.len() {
                    return None;
                }
                if ignores_empty_lines && trimmed.is_empty() {
                    return None;
                }
                let character = trimmed.chars().count() + 1;
                Some(Violation::new(
                    IDENTIFIER,
                    Severity::Medium,
                    Location::new(unit.location_path(), line.index).with_character(character),
                    "Lines should not have trailing whitespace.",
                ))
            })
            .collect()
    }
}
