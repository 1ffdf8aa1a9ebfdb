//! Rule presets for common configurations.

use crate::{FileLength, LineLength, MultilineArguments, TrailingNewline, TrailingWhitespace, TypeName};
use tidemark_core::RuleBox;

/// Preset rule selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every rule enabled by default; opt-in rules are left out.
    #[default]
    Default,
    /// Every built-in rule.
    All,
    /// Whitespace rules only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Default => default_rules(),
            Self::All => all_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the default set of rules.
///
/// Includes everything except the opt-in `multiline_arguments`.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FileLength::new()),
        Box::new(LineLength::new()),
        Box::new(TrailingNewline::new()),
        Box::new(TrailingWhitespace::new()),
        Box::new(TypeName::new()),
    ]
}

/// Returns the minimal set of rules.
///
/// - `trailing_newline`
/// - `trailing_whitespace`
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(TrailingNewline::new()),
        Box::new(TrailingWhitespace::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FileLength::new()),
        Box::new(LineLength::new()),
        Box::new(MultilineArguments::new()),
        Box::new(TrailingNewline::new()),
        Box::new(TrailingWhitespace::new()),
        Box::new(TypeName::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.identifier()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::All.rules().len(), 6);
        assert!(!ids(&Preset::Default.rules()).contains(&"multiline_arguments"));
        assert_eq!(
            ids(&Preset::Minimal.rules()),
            vec!["trailing_newline", "trailing_whitespace"]
        );
    }

    #[test]
    fn test_all_matches_catalog() {
        assert_eq!(
            ids(&all_rules()),
            crate::RuleCatalog::builtin().identifiers()
        );
    }
}
