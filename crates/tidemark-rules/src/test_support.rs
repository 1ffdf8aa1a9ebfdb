//! Shared harness that runs rule descriptor examples.
//!
//! Each `↓` in an example marks where a violation is expected. Violations
//! without a character match a marker at the start of their line. Examples
//! without markers only need to trigger at least once.

use tidemark_core::{SwiftSyntax, Rule, RuleConfig, SourceUnit, SyntaxService, Violation};

pub(crate) const MARKER: char = '↓';

/// Builds a unit through the Swift syntax service.
pub(crate) fn unit(contents: &str) -> SourceUnit {
    SwiftSyntax::new()
        .parse(None, contents.to_string())
        .expect("swift language loads")
}

/// Runs `rule` over `contents` with `config`.
pub(crate) fn violations_with(
    rule: &dyn Rule,
    contents: &str,
    config: &RuleConfig,
) -> Vec<Violation> {
    let mut violations = rule.validate(&unit(contents), config);
    violations.sort_by(Violation::cmp_in_file);
    violations
}

/// Runs `rule` over `contents` with default options.
pub(crate) fn violations(rule: &dyn Rule, contents: &str) -> Vec<Violation> {
    violations_with(rule, contents, &RuleConfig::default())
}

/// Removes markers and returns the cleaned text with marker positions.
pub(crate) fn strip_markers(example: &str) -> (String, Vec<(usize, usize)>) {
    let mut cleaned = String::with_capacity(example.len());
    let mut markers = Vec::new();
    let (mut line, mut character) = (1, 1);
    for c in example.chars() {
        if c == MARKER {
            markers.push((line, character));
            continue;
        }
        cleaned.push(c);
        if c == '\n' {
            line += 1;
            character = 1;
        } else {
            character += 1;
        }
    }
    (cleaned, markers)
}

fn positions(violations: &[Violation]) -> Vec<(usize, usize)> {
    violations
        .iter()
        .map(|v| (v.location.line, v.location.character.unwrap_or(1)))
        .collect()
}

/// Asserts that the rule's descriptor examples behave as documented.
pub(crate) fn verify_examples(rule: &dyn Rule) {
    verify_examples_with(rule, &RuleConfig::default());
}

/// Like [`verify_examples`] with explicit options.
pub(crate) fn verify_examples_with(rule: &dyn Rule, config: &RuleConfig) {
    let descriptor = rule.descriptor();
    for example in descriptor.non_triggering_examples {
        let (cleaned, _) = strip_markers(example);
        let found = violations_with(rule, &cleaned, config);
        assert!(
            found.is_empty(),
            "{}: non-triggering example {:?} produced {:?}",
            descriptor.identifier,
            example,
            positions(&found)
        );
    }
    for example in descriptor.triggering_examples {
        let (cleaned, markers) = strip_markers(example);
        let found = violations_with(rule, &cleaned, config);
        if markers.is_empty() {
            assert!(
                !found.is_empty(),
                "{}: triggering example {:?} produced nothing",
                descriptor.identifier,
                example
            );
        } else {
            assert_eq!(
                positions(&found),
                markers,
                "{}: triggering example {:?}",
                descriptor.identifier,
                example
            );
        }
        assert!(
            found.iter().all(|v| v.rule == descriptor.identifier),
            "{}: violations carry a foreign identifier",
            descriptor.identifier
        );
    }
}

#[test]
fn strip_markers_reports_positions() {
    let (cleaned, markers) = strip_markers("a↓b\n↓c");
    assert_eq!(cleaned, "ab\nc");
    assert_eq!(markers, vec![(1, 2), (2, 1)]);
}
