//! Static registration list of the built-in rules.

use crate::{FileLength, LineLength, MultilineArguments, TrailingNewline, TrailingWhitespace, TypeName};
use thiserror::Error;
use tidemark_core::{RuleBox, RuleDescriptor};
use tracing::debug;

type Factory = fn() -> RuleBox;

/// Every built-in rule, in listing order.
const BUILTIN: &[Factory] = &[
    || Box::new(FileLength::new()),
    || Box::new(LineLength::new()),
    || Box::new(MultilineArguments::new()),
    || Box::new(TrailingNewline::new()),
    || Box::new(TrailingWhitespace::new()),
    || Box::new(TypeName::new()),
];

/// Errors from selecting rules by identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No rule has the requested identifier.
    #[error("Unknown rule '{identifier}'. Available rules: {available}")]
    UnknownRule {
        /// Requested identifier.
        identifier: String,
        /// Comma-separated known identifiers.
        available: String,
    },
}

/// Registry of rules that can be instantiated by identifier.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    factories: Vec<Factory>,
}

impl RuleCatalog {
    /// Returns the catalog of built-in rules.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            factories: BUILTIN.to_vec(),
        }
    }

    /// Descriptors of all rules, in listing order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<&'static RuleDescriptor> {
        self.factories.iter().map(|f| f().descriptor()).collect()
    }

    /// Identifiers of all rules, in listing order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.descriptors().iter().map(|d| d.identifier).collect()
    }

    /// Instantiates the rule with `identifier`.
    #[must_use]
    pub fn create(&self, identifier: &str) -> Option<RuleBox> {
        self.factories
            .iter()
            .map(|f| f())
            .find(|rule| rule.identifier() == identifier)
    }

    /// Instantiates every rule.
    #[must_use]
    pub fn all(&self) -> Vec<RuleBox> {
        self.factories.iter().map(|f| f()).collect()
    }

    /// Instantiates the rules named in `identifiers`, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownRule`] for the first unknown identifier.
    pub fn select<S: AsRef<str>>(&self, identifiers: &[S]) -> Result<Vec<RuleBox>, CatalogError> {
        let mut selected: Vec<RuleBox> = Vec::new();
        for identifier in identifiers {
            let identifier = identifier.as_ref().trim();
            if selected.iter().any(|r| r.identifier() == identifier) {
                continue;
            }
            let rule = self
                .create(identifier)
                .ok_or_else(|| CatalogError::UnknownRule {
                    identifier: identifier.to_string(),
                    available: self.identifiers().join(", "),
                })?;
            debug!("Selected rule: {}", identifier);
            selected.push(rule);
        }
        Ok(selected)
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
