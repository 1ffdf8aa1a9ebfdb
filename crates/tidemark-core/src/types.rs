//! Core types for lint violations and results.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Severity level for lint violations.
///
/// Ordered so that thresholds can be expressed as `severity >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cosmetic issue.
    Low,
    /// Style issue that should be addressed.
    Medium,
    /// Issue that must be fixed.
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path, absent for in-memory content.
    pub file: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
    /// Character within the line (1-indexed), if the violation has one.
    pub character: Option<usize>,
}

impl Location {
    /// Creates a location pointing at a whole line.
    #[must_use]
    pub fn new(file: Option<PathBuf>, line: usize) -> Self {
        Self {
            file,
            line,
            character: None,
        }
    }

    /// Sets the character column.
    #[must_use]
    pub fn with_character(mut self, character: usize) -> Self {
        self.character = Some(character);
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}", file.display())?,
            None => write!(f, "<stdin>")?,
        }
        write!(f, ":{}", self.line)?;
        if let Some(character) = self.character {
            write!(f, ":{character}")?;
        }
        Ok(())
    }
}

/// A style violation found during linting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the rule that produced this violation (e.g. `trailing_newline`).
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Location of the violation.
    pub location: Location,
    /// Human-readable reason.
    pub reason: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            location,
            reason: reason.into(),
        }
    }

    /// Ordering used for a single file: line, then character, then rule.
    ///
    /// A violation without a character sorts before any column on the same line.
    #[must_use]
    pub fn cmp_in_file(&self, other: &Self) -> Ordering {
        self.location
            .line
            .cmp(&other.location.line)
            .then(self.location.character.cmp(&other.location.character))
            .then_with(|| self.rule.cmp(&other.rule))
    }

    /// Ordering used across files: file path first, then [`Self::cmp_in_file`].
    #[must_use]
    pub fn cmp_across_files(&self, other: &Self) -> Ordering {
        self.location
            .file
            .cmp(&other.location.file)
            .then_with(|| self.cmp_in_file(other))
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{} at {}\n  {}: {}\n",
            self.rule, self.location, self.severity, self.reason
        )
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location, self.severity, self.rule, self.reason
        )
    }
}

/// A contained fault reported alongside otherwise successful results.
///
/// Produced for unreadable files and for rules that fault while validating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What the diagnostic is about: a file path or a rule identifier.
    pub subject: String,
    /// Description of the fault.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// Result of linting a batch of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found, ordered by file, line, character and rule.
    pub violations: Vec<Violation>,
    /// Number of files that were linted.
    pub files_checked: usize,
    /// Contained per-file and per-rule faults.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts violations by severity as `(high, medium, low)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity: Severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::High),
            count(Severity::Medium),
            count(Severity::Low),
        )
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Formats the one-line summary printed after a lint run.
    #[must_use]
    pub fn summary(&self) -> String {
        let count = self.violations.len();
        format!(
            "Done linting! Found {} violation{}, in {} file{}.",
            count,
            if count == 1 { "" } else { "s" },
            self.files_checked,
            if self.files_checked == 1 { "" } else { "s" },
        )
    }

    /// Adds violations and diagnostics from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.diagnostics.extend(other.diagnostics);
        self.files_checked += other.files_checked;
    }

    /// Restores the cross-file ordering after results were merged.
    pub fn sort(&mut self) {
        self.violations.sort_by(Violation::cmp_across_files);
    }
}
