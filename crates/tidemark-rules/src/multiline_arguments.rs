//! Rule requiring call arguments to be on one line or one per line.
//!
//! A call whose arguments all share a line is accepted. Otherwise every
//! argument after the first must start on a line no earlier argument starts
//! on, and the first argument must respect the configured placement.
//!
//! # Configuration
//!
//! - `first_argument_location`: `any_line` (default), `same_line` (first
//!   argument on the line of the call) or `next_line` (first argument below
//!   the call)

use std::collections::HashSet;
use std::str::FromStr;
use tidemark_core::{
    DeclarationKind, DeclarationNode, Location, Rule, RuleConfig, RuleDescriptor, Severity,
    SourceUnit, Violation,
};

/// Rule identifier for multiline-arguments.
pub const IDENTIFIER: &str = "multiline_arguments";

const REASON: &str = "Arguments should be either on the same line, or one per line.";

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    identifier: IDENTIFIER,
    name: "Multiline Arguments",
    description: "Arguments should be either on the same line, or one per line.",
    non_triggering_examples: &[
        "foo()",
        "foo(\n)",
        "foo { }",
        "foo(0)",
        "foo(0, 1)",
        "foo(0, param1: 1) { }",
        "foo(param1: 1, param2: true, param3: [3]) {\n    bar()\n}",
        "foo(param1: 1,\n    param2: true,\n    param3: [3])",
        "foo(\n    param1: 1, param2: true, param3: [3]\n)",
        "foo(\n    param1: 1,\n    param2: true,\n    param3: [3]\n)",
        "foo(a, bar(b,\n    c))",
    ],
    triggering_examples: &[
        "foo(0, ↓param1: 1,\n    param2: true, ↓param3: [3])",
        "foo(\n    param1: 1,\n    param2: true, ↓param3: [3]\n)",
        "foo(param1: 1, ↓param2: true,\n    param3: [3])",
        "let x = Value(a: 1,\n    b: bar(c, ↓d: 2,\n    e: 3))",
    ],
};

/// Where the first argument of a multi-line call must start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstArgumentLocation {
    /// No constraint.
    #[default]
    AnyLine,
    /// On the line of the call.
    SameLine,
    /// On a line after the call.
    NextLine,
}

impl FromStr for FirstArgumentLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any_line" => Ok(Self::AnyLine),
            "same_line" => Ok(Self::SameLine),
            "next_line" => Ok(Self::NextLine),
            other => Err(format!("unknown first argument location '{other}'")),
        }
    }
}

/// Requires arguments to be on a single line or one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultilineArguments;

impl MultilineArguments {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_call(
        unit: &SourceUnit,
        call: &DeclarationNode,
        placement: FirstArgumentLocation,
    ) -> Vec<(usize, usize)> {
        let arguments: Vec<(usize, usize)> = call
            .children
            .iter()
            .filter(|child| child.kind == DeclarationKind::Argument)
            .filter_map(|argument| unit.line_and_character(argument.offset))
            .collect();
        let (Some(&(first_line, _)), Some((call_line, _))) =
            (arguments.first(), unit.line_and_character(call.offset))
        else {
            return Vec::new();
        };

        let single_line = arguments.iter().all(|&(line, _)| line == first_line);
        let exempt = match placement {
            FirstArgumentLocation::SameLine => single_line && first_line == call_line,
            FirstArgumentLocation::AnyLine | FirstArgumentLocation::NextLine => single_line,
        };
        if exempt {
            return Vec::new();
        }

        let mut offending = Vec::new();
        let first_misplaced = match placement {
            FirstArgumentLocation::AnyLine => false,
            FirstArgumentLocation::SameLine => first_line != call_line,
            FirstArgumentLocation::NextLine => first_line == call_line,
        };
        if first_misplaced {
            offending.push(arguments[0]);
        }

        let mut occupied = HashSet::from([first_line]);
        for &(line, character) in &arguments[1..] {
            if !occupied.insert(line) {
                offending.push((line, character));
            }
        }
        offending
    }
}

impl Rule for MultilineArguments {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DESCRIPTOR
    }

    fn validate(&self, unit: &SourceUnit, config: &RuleConfig) -> Vec<Violation> {
        let placement: FirstArgumentLocation = config.get_choice("first_argument_location");

        unit.structure()
            .walk()
            .filter(|node| node.kind == DeclarationKind::Call)
            .flat_map(|call| Self::check_call(unit, call, placement))
            .map(|(line, character)| {
                Violation::new(
                    IDENTIFIER,
                    Severity::Medium,
                    Location::new(unit.location_path(), line).with_character(character),
                    REASON,
                )
            })
            .collect()
    }
}
