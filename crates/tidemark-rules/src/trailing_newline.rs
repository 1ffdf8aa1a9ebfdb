//! Rule requiring files to end with exactly one newline.
//!
//! # Detected Patterns
//!
//! - Files with no final line terminator
//! - Files ending in blank lines
//!
//! `\r\n` counts as a single terminator and a lone `\r` counts as one.
//! Empty files are accepted.

use tidemark_core::{Location, Rule, RuleConfig, RuleDescriptor, Severity, SourceUnit, Violation};

/// Rule identifier for trailing-newline.
pub const IDENTIFIER: &str = "trailing_newline";

const REASON: &str = "File should have a single trailing newline.";

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    identifier: IDENTIFIER,
    name: "Trailing Newline",
    description: "Files should have a single trailing newline.",
    non_triggering_examples: &["let a = 0\n", "let a = 0\r\n", ""],
    triggering_examples: &["let a = 0", "let a = 0\n\n", "let a = 0\n\n\n", "let a = 0\r\n\r\n"],
};

/// Requires a single trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingNewline;

impl TrailingNewline {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Counts trailing line terminators: `\r\n`, `\n` and a lone `\r` each count once.
fn trailing_newlines(contents: &str) -> usize {
    let mut rest = contents;
    let mut count = 0;
    loop {
        let stripped = match rest.strip_suffix("\r\n") {
            Some(stripped) => stripped,
            None => match rest.strip_suffix(['\n', '\r']) {
                Some(stripped) => stripped,
                None => return count,
            },
        };
        rest = stripped;
        count += 1;
    }
}

impl Rule for TrailingNewline {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DESCRIPTOR
    }

    fn validate(&self, unit: &SourceUnit, _config: &RuleConfig) -> Vec<Violation> {
        let contents = unit.contents();
        if contents.is_empty() || trailing_newlines(contents) == 1 {
            return Vec::new();
        }

        vec![Violation::new(
            IDENTIFIER,
            Severity::Medium,
            Location::new(unit.location_path(), unit.lines().len() + 1),
            REASON,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{verify_examples, violations};

    #[test]
    fn test_examples() {
        verify_examples(&TrailingNewline);
    }

    #[test]
    fn test_counts_terminators() {
        assert_eq!(trailing_newlines("a"), 0);
        assert_eq!(trailing_newlines("a\n"), 1);
        assert_eq!(trailing_newlines("a\r\n"), 1);
        assert_eq!(trailing_newlines("a\n\r\n\n"), 3);
        assert_eq!(trailing_newlines("\n"), 1);
        assert_eq!(trailing_newlines("a\r"), 1);
        assert_eq!(trailing_newlines("a\r\r"), 2);
        assert_eq!(trailing_newlines("a\n\r"), 2);
    }

    #[test]
    fn test_lone_carriage_return_terminates_file() {
        assert!(violations(&TrailingNewline, "let a = 0\r").is_empty());
        assert_eq!(violations(&TrailingNewline, "let a = 0\r\r").len(), 1);
    }

    #[test]
    fn test_violation_is_past_last_line() {
        let found = violations(&TrailingNewline, "let a = 0\n\n\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location.line, 4);
        assert_eq!(found[0].location.character, None);
        assert_eq!(found[0].severity, Severity::Medium);
        assert_eq!(found[0].reason, REASON);

        let found = violations(&TrailingNewline, "let a = 0");
        assert_eq!(found[0].location.line, 2);
    }

    #[test]
    fn test_single_newline_only_file() {
        assert!(violations(&TrailingNewline, "\n").is_empty());
        assert_eq!(violations(&TrailingNewline, "\n\n").len(), 1);
    }
}
