//! Rule checking names of protocol, class, struct and enum declarations.
//!
//! # Configuration
//!
//! - `min_length`: Shortest allowed name (default: 3)
//! - `max_length`: Longest allowed name (default: 40)

use tidemark_core::{Location, Rule, RuleConfig, RuleDescriptor, Severity, SourceUnit, Violation};

/// Rule identifier for type-name.
pub const IDENTIFIER: &str = "type_name";

const DEFAULT_MIN_LENGTH: usize = 3;
const DEFAULT_MAX_LENGTH: usize = 40;

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    identifier: IDENTIFIER,
    name: "Type Name",
    description: "Type names should start with an uppercase character and be between 3 and 40 characters long.",
    non_triggering_examples: &[
        "struct MyType {}\n",
        "protocol Drawable {}\n",
        "class Outer {\n    enum Inner {}\n}\n",
        "extension abc {}\n",
        "let abc = MyType()\n",
    ],
    triggering_examples: &[
        "↓struct myType {}\n",
        "↓class My {}\n",
        "↓protocol Aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa {}\n",
        "class Outer {\n    ↓enum inner {}\n}\n",
    ],
};

/// Validates type declaration names.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeName;

impl TypeName {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn name_problem(name: &str, min_length: usize, max_length: usize) -> Option<String> {
    if !name.chars().next().is_some_and(char::is_uppercase) {
        return Some(format!(
            "Type name should start with an uppercase character: '{name}'"
        ));
    }
    let length = name.chars().count();
    if length < min_length || length > max_length {
        return Some(format!(
            "Type name should be between {min_length} and {max_length} characters long: '{name}'"
        ));
    }
    None
}

impl Rule for TypeName {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DESCRIPTOR
    }

    fn validate(&self, unit: &SourceUnit, config: &RuleConfig) -> Vec<Violation> {
        let min_length = config.get_usize("min_length", DEFAULT_MIN_LENGTH);
        let max_length = config.get_usize("max_length", DEFAULT_MAX_LENGTH);

        unit.structure()
            .walk()
            .filter(|node| node.kind.is_type())
            .filter_map(|node| {
                let name = node.name.as_deref()?;
                let reason = name_problem(name, min_length, max_length)?;
                let (line, character) = unit.line_and_character(node.offset)?;
                Some(Violation::new(
                    IDENTIFIER,
                    Severity::Medium,
                    Location::new(unit.location_path(), line).with_character(character),
                    reason,
                ))
            })
            .collect()
    }
}
