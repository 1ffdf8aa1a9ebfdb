//! Comment-based suppression directives.
//!
//! Supports directives like:
//! ```text
//! // tidemark:disable:next-line line_length, trailing_whitespace
//! let url = "https://example.com/a/very/long/path" // tidemark:disable:this-line line_length
//! ```
//!
//! The special rule name `all` suppresses every rule.

use crate::source::SourceUnit;
use std::collections::{HashMap, HashSet};

const PREFIX: &str = "tidemark:disable:";

/// Which line a directive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    ThisLine,
    NextLine,
}

/// Parsed suppression directive.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    scope: Scope,
    rules: HashSet<String>,
}

/// Suppressed rules per line of one source unit.
#[derive(Debug, Default)]
pub struct Suppressions {
    by_line: HashMap<usize, HashSet<String>>,
}

impl Suppressions {
    /// Collects every directive in the unit.
    #[must_use]
    pub fn collect(unit: &SourceUnit) -> Self {
        let mut by_line: HashMap<usize, HashSet<String>> = HashMap::new();
        if !unit.contents().contains(PREFIX) {
            return Self { by_line };
        }
        for line in unit.lines() {
            if let Some(directive) = parse_directive(&line.text) {
                let target = match directive.scope {
                    Scope::ThisLine => line.index,
                    Scope::NextLine => line.index + 1,
                };
                by_line.entry(target).or_default().extend(directive.rules);
            }
        }
        Self { by_line }
    }

    /// Returns true if `rule` is suppressed on `line`.
    #[must_use]
    pub fn is_suppressed(&self, line: usize, rule: &str) -> bool {
        self.by_line
            .get(&line)
            .is_some_and(|rules| rules.contains(rule) || rules.contains("all"))
    }

    /// Returns true if no directive was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }
}

/// Parses a directive from the comment part of a line.
///
/// The last occurrence of the prefix counts, and only when a `//` opener
/// directly precedes it.
fn parse_directive(line: &str) -> Option<Directive> {
    let start = line.rfind(PREFIX)?;
    if !line[..start].trim_end().ends_with("//") {
        return None;
    }
    let rest = line[start + PREFIX.len()..].trim_end();

    let (scope, rules_str) = if let Some(rules) = rest.strip_prefix("next-line") {
        (Scope::NextLine, rules)
    } else if let Some(rules) = rest.strip_prefix("this-line") {
        (Scope::ThisLine, rules)
    } else {
        return None;
    };

    let rules: HashSet<String> = rules_str
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if rules.is_empty() {
        return None;
    }

    Some(Directive { scope, rules })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_next_line_directive() {
        let directive = parse_directive("// tidemark:disable:next-line line_length").unwrap();
        assert_eq!(directive.scope, Scope::NextLine);
        assert!(directive.rules.contains("line_length"));
    }

    #[test]
    fn test_parse_trailing_this_line_directive() {
        let directive =
            parse_directive("let a = 1 // tidemark:disable:this-line rule1, rule2").unwrap();
        assert_eq!(directive.scope, Scope::ThisLine);
        assert!(directive.rules.contains("rule1"));
        assert!(directive.rules.contains("rule2"));
    }

    #[test]
    fn test_reject_malformed_directives() {
        assert!(parse_directive("// tidemark:disable:next-line").is_none());
        assert!(parse_directive("// tidemark:disable:everything rule").is_none());
        assert!(parse_directive("let tidemark = 1").is_none());
        assert!(parse_directive("let s = \"tidemark:disable:this-line all\"").is_none());
    }

    #[test]
    fn test_directive_after_url_in_string() {
        let unit = SourceUnit::from_contents(
            "let url = \"https://example.com/a/very/long/path\" // tidemark:disable:this-line line_length\n",
        );
        let suppressions = Suppressions::collect(&unit);
        assert!(suppressions.is_suppressed(1, "line_length"));
        assert!(!suppressions.is_suppressed(1, "trailing_whitespace"));
    }

    #[test]
    fn test_doc_comment_opener() {
        let directive = parse_directive("/// tidemark:disable:next-line type_name").unwrap();
        assert_eq!(directive.scope, Scope::NextLine);
    }

    #[test]
    fn test_collect_suppressions() {
        let unit = SourceUnit::from_contents(
            "// tidemark:disable:next-line line_length\nlet a = 1\nlet b = 2 // tidemark:disable:this-line all\n",
        );
        let suppressions = Suppressions::collect(&unit);
        assert!(suppressions.is_suppressed(2, "line_length"));
        assert!(!suppressions.is_suppressed(2, "trailing_whitespace"));
        assert!(suppressions.is_suppressed(3, "anything"));
        assert!(!suppressions.is_suppressed(1, "line_length"));
    }

    #[test]
    fn test_no_directives() {
        let unit = SourceUnit::from_contents("let a = 1\n");
        assert!(Suppressions::collect(&unit).is_empty());
    }
}
