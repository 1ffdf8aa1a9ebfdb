//! Rule trait and metadata for defining style rules.

use crate::config::RuleConfig;
use crate::source::SourceUnit;
use crate::types::Violation;
use serde::Serialize;

/// Static metadata describing a rule.
///
/// Examples mark each expected violation position with `↓`; they are run by
/// the rules crate's test harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    /// Unique, stable `snake_case` identifier (e.g. `trailing_newline`).
    pub identifier: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// What the rule checks.
    pub description: &'static str,
    /// Snippets that must not trigger the rule.
    pub non_triggering_examples: &'static [&'static str],
    /// Snippets that must trigger the rule.
    pub triggering_examples: &'static [&'static str],
}

/// A per-file style rule.
///
/// Rules are pure functions of the source unit and their configuration. A
/// rule that does not apply returns an empty vector; it never fails.
///
/// # Example
///
/// ```ignore
/// use tidemark_core::{Location, Rule, RuleConfig, RuleDescriptor, Severity, SourceUnit, Violation};
///
/// pub struct NoTabs;
///
/// static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
///     identifier: "no_tabs",
///     name: "No Tabs",
///     description: "Lines should be indented with spaces.",
///     non_triggering_examples: &["let a = 1\n"],
///     triggering_examples: &["↓\tlet a = 1\n"],
/// };
///
/// impl Rule for NoTabs {
///     fn descriptor(&self) -> &'static RuleDescriptor { &DESCRIPTOR }
///
///     fn validate(&self, unit: &SourceUnit, _config: &RuleConfig) -> Vec<Violation> {
///         unit.lines()
///             .iter()
///             .filter(|line| line.text.starts_with('\t'))
///             .map(|line| Violation::new(
///                 self.identifier(),
///                 Severity::Low,
///                 Location::new(unit.location_path(), line.index).with_character(1),
///                 "Lines should be indented with spaces.",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule's static metadata.
    fn descriptor(&self) -> &'static RuleDescriptor;

    /// Returns the rule identifier.
    fn identifier(&self) -> &'static str {
        self.descriptor().identifier
    }

    /// Checks a single source unit and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `unit` - The parsed file being checked
    /// * `config` - Options for this rule; missing options use defaults
    fn validate(&self, unit: &SourceUnit, config: &RuleConfig) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};

    struct TestRule;

    static TEST_DESCRIPTOR: RuleDescriptor = RuleDescriptor {
        identifier: "test_rule",
        name: "Test Rule",
        description: "A test rule",
        non_triggering_examples: &[],
        triggering_examples: &[],
    };

    impl Rule for TestRule {
        fn descriptor(&self) -> &'static RuleDescriptor {
            &TEST_DESCRIPTOR
        }

        fn validate(&self, unit: &SourceUnit, _config: &RuleConfig) -> Vec<Violation> {
            vec![Violation::new(
                self.identifier(),
                Severity::Low,
                Location::new(unit.location_path(), 1),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.identifier(), "test_rule");
        assert_eq!(rule.descriptor().name, "Test Rule");

        let unit = SourceUnit::from_contents("let a = 1\n");
        let violations = rule.validate(&unit, &RuleConfig::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "test_rule");
    }
}
