//! # tidemark-rules
//!
//! Built-in style rules for tidemark.
//!
//! ## Available Rules
//!
//! | Identifier | Description |
//! |------------|-------------|
//! | `file_length` | Limits the number of lines in a file |
//! | `line_length` | Limits the number of characters per line |
//! | `multiline_arguments` | Call arguments on one line or one per line (opt-in) |
//! | `trailing_newline` | Files end with exactly one newline |
//! | `trailing_whitespace` | No spaces or tabs at the end of lines |
//! | `type_name` | Type names start upper-case and have a bounded length |
//!
//! ## Usage
//!
//! ```ignore
//! use tidemark_core::{SwiftSyntax, Linter};
//! use tidemark_rules::RuleCatalog;
//!
//! let linter = Linter::builder()
//!     .rules(RuleCatalog::builtin().all())
//!     .build()?;
//! let result = linter.lint_paths(&SwiftSyntax::new(), &["Sources".into()])?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod file_length;
mod line_length;
mod multiline_arguments;
mod presets;
mod trailing_newline;
mod trailing_whitespace;
mod type_name;

#[cfg(test)]
mod test_support;

pub use catalog::{CatalogError, RuleCatalog};
pub use file_length::FileLength;
pub use line_length::LineLength;
pub use multiline_arguments::{FirstArgumentLocation, MultilineArguments};
pub use presets::{all_rules, default_rules, minimal_rules, Preset};
pub use trailing_newline::TrailingNewline;
pub use trailing_whitespace::TrailingWhitespace;
pub use type_name::TypeName;

/// Re-export core types for convenience.
pub use tidemark_core::{Rule, Severity, Violation};
