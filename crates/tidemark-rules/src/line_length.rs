//! Rule limiting line length.
//!
//! Length is measured in characters, excluding the line terminator.
//!
//! # Configuration
//!
//! - `warning`: Longest allowed line before a medium violation (default: 120)
//! - `error`: Longest allowed line before a high violation (default: 200)
//! - `ignores_comments`: Skip lines that are only a `//` comment (default: false)
//! - `ignores_urls`: Measure lines with `http(s)://` links removed (default: false)

use tidemark_core::{Location, Rule, RuleConfig, RuleDescriptor, Severity, SourceUnit, Violation};

/// Rule identifier for line-length.
pub const IDENTIFIER: &str = "line_length";

const DEFAULT_WARNING: usize = 120;
const DEFAULT_ERROR: usize = 200;

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    identifier: IDENTIFIER,
    name: "Line Length",
    description: "Lines should not span too many characters.",
    non_triggering_examples: &[
        "let x = \"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\"\n",
        "let short = 1\n",
    ],
    triggering_examples: &[
        "↓let x = \"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\"\n",
        "let a = 1\n↓let x = \"bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\"\n",
    ],
};

/// Limits the number of characters per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineLength;

impl LineLength {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Removes `http://` and `https://` links up to the next whitespace.
fn without_urls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = ["http://", "https://"]
        .iter()
        .filter_map(|scheme| rest.find(scheme))
        .min()
    {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        rest = &tail[end..];
    }
    out.push_str(rest);
    out
}

impl Rule for LineLength {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DESCRIPTOR
    }

    fn validate(&self, unit: &SourceUnit, config: &RuleConfig) -> Vec<Violation> {
        let warning = config.get_usize("warning", DEFAULT_WARNING);
        let error = config.get_usize("error", DEFAULT_ERROR);
        let ignores_comments = config.get_bool("ignores_comments", false);
        let ignores_urls = config.get_bool("ignores_urls", false);

        let mut violations = Vec::new();
        for line in unit.lines() {
            if ignores_comments && line.text.trim_start().starts_with("//") {
                continue;
            }
            let length = if ignores_urls {
                without_urls(&line.text).chars().count()
            } else {
                line.text.chars().count()
            };

            let (severity, limit) = if length > error {
                (Severity::High, error)
            } else if length > warning {
                (Severity::Medium, warning)
            } else {
                continue;
            };

            violations.push(Violation::new(
                IDENTIFIER,
                severity,
                Location::new(unit.location_path(), line.index),
                format!("Line should be {limit} characters or less: currently {length} characters"),
            ));
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{verify_examples, violations, violations_with};

    #[test]
    fn test_examples() {
        verify_examples(&LineLength);
    }

    #[test]
    fn test_severity_follows_thresholds() {
        let contents = format!("{}\n{}\n{}\n", "a".repeat(120), "b".repeat(121), "c".repeat(201));
        let found = violations(&LineLength, &contents);
        let summary: Vec<_> = found.iter().map(|v| (v.location.line, v.severity)).collect();
        assert_eq!(summary, vec![(2, Severity::Medium), (3, Severity::High)]);
        insta::assert_snapshot!(found[1].reason, @"Line should be 200 characters or less: currently 201 characters");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let contents = format!("{}\n", "é".repeat(100));
        assert!(violations(&LineLength, &contents).is_empty());
    }

    #[test]
    fn test_configured_thresholds_and_comments() {
        let config = RuleConfig::with_options([
            ("warning", toml::Value::Integer(10)),
            ("error", toml::Value::Integer(20)),
            ("ignores_comments", toml::Value::Boolean(true)),
        ]);
        let contents = "let abcdefgh = 1\n// a comment that is long\n";
        let found = violations_with(&LineLength, contents, &config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location.line, 1);
        assert_eq!(found[0].severity, Severity::Medium);
    }

    #[test]
    fn test_ignores_urls() {
        let config = RuleConfig::with_options([
            ("warning", toml::Value::Integer(20)),
            ("ignores_urls", toml::Value::Boolean(true)),
        ]);
        let contents = "// see https://example.com/a/very/long/path/to/some/resource\n";
        assert!(violations_with(&LineLength, contents, &config).is_empty());
        assert_eq!(without_urls("a http://x.y b https://z c"), "a  b  c");
    }
}
