//! # tidemark-core
//!
//! Core framework for style linting of Swift-like source files.
//!
//! This crate provides the foundational traits and types for building
//! source linters. It includes:
//!
//! - [`Rule`] trait for per-file rules over a [`SourceUnit`]
//! - [`SyntaxService`] for reading files and extracting their declaration structure
//! - [`Linter`] for running rules over files in parallel
//! - [`DeclarationIndex`] and [`IndexBuilder`] for the incremental cross-file index
//!
//! ## Example
//!
//! ```ignore
//! use tidemark_core::{SwiftSyntax, Linter};
//!
//! let linter = Linter::builder()
//!     .rule(MyRule)
//!     .build()?;
//!
//! let result = linter.lint_paths(&SwiftSyntax::new(), &["Sources".into()])?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod directives;
mod discovery;
mod index;
mod linter;
mod rule;
mod source;
mod swift;
mod syntax;
mod types;

pub use config::{Config, ConfigError, IndexConfig, LinterConfig, RuleConfig};
pub use directives::Suppressions;
pub use discovery::{absolute, FileDiscovery};
pub use index::{
    tracked_declarations, DeclarationIndex, IndexBuilder, IndexError, IndexLoad, IndexOutcome,
};
pub use linter::{LintError, Linter, LinterBuilder, UnitReport};
pub use rule::{Rule, RuleBox, RuleDescriptor};
pub use source::{DeclarationKind, DeclarationNode, Line, SourceUnit, Walk};
pub use swift::SwiftSyntax;
pub use syntax::{SyntaxError, SyntaxService};
pub use types::{Diagnostic, LintResult, Location, Severity, Violation};
