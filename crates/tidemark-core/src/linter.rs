//! Linter orchestrating rule execution over source units.

use crate::config::Config;
use crate::directives::Suppressions;
use crate::discovery::FileDiscovery;
use crate::rule::{Rule, RuleBox};
use crate::source::SourceUnit;
use crate::syntax::{SyntaxError, SyntaxService};
use crate::types::{Diagnostic, LintResult, Violation};

use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a lint run as a whole.
#[derive(Debug, Error)]
pub enum LintError {
    /// None of the given paths produced a lintable file.
    #[error("No lintable files found at paths {}", display_paths(.paths))]
    NoLintableFiles {
        /// The paths that were searched.
        paths: Vec<PathBuf>,
    },

    /// Content supplied directly could not be materialised.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Violations and contained faults for one source unit.
#[derive(Debug, Default)]
pub struct UnitReport {
    /// Violations ordered by line, character and rule.
    pub violations: Vec<Violation>,
    /// Rules that faulted while validating this unit.
    pub diagnostics: Vec<Diagnostic>,
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the linter.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the linter.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleBox>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the linter.
    ///
    /// # Errors
    ///
    /// Returns an error if a bounded worker pool was requested and cannot be created.
    pub fn build(self) -> Result<Linter, LintError> {
        let config = self.config.unwrap_or_default();

        let pool = match config.linter.jobs {
            Some(jobs) if jobs > 0 => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .thread_name(|i| format!("tidemark-worker-{i}"))
                    .build()?,
            ),
            _ => None,
        };

        Ok(Linter {
            rules: self.rules,
            config,
            pool,
        })
    }
}

/// Runs a set of rules over source units.
///
/// Holds no per-call state; one instance can lint many units concurrently.
/// Use [`Linter::builder()`] to construct an instance.
pub struct Linter {
    rules: Vec<RuleBox>,
    config: Config,
    pool: Option<rayon::ThreadPool>,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lints one unit and returns its ordered violations.
    ///
    /// Rule faults are logged; use [`Linter::check`] to receive them.
    #[must_use]
    pub fn lint(&self, unit: &SourceUnit) -> Vec<Violation> {
        self.check(unit).violations
    }

    /// Lints one unit, returning violations and per-rule fault diagnostics.
    #[must_use]
    pub fn check(&self, unit: &SourceUnit) -> UnitReport {
        let suppressions = Suppressions::collect(unit);
        let mut report = UnitReport::default();

        for rule in &self.rules {
            let identifier = rule.identifier();
            if !self.config.is_rule_enabled(identifier) {
                debug!("Skipping disabled rule: {}", identifier);
                continue;
            }

            match self.run_rule(rule.as_ref(), unit) {
                Ok(violations) => report.violations.extend(
                    violations
                        .into_iter()
                        .filter(|v| !suppressions.is_suppressed(v.location.line, &v.rule)),
                ),
                Err(diagnostic) => {
                    warn!("{}", diagnostic);
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        report.violations.sort_by(Violation::cmp_in_file);
        report
    }

    /// Runs one rule in isolation so that a faulting rule cannot take the others down.
    fn run_rule(&self, rule: &dyn Rule, unit: &SourceUnit) -> Result<Vec<Violation>, Diagnostic> {
        let identifier = rule.identifier();
        let options = self.config.rule_config(identifier);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.validate(unit, options)));
        let mut violations = outcome.map_err(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown fault".to_string());
            let file = unit
                .path()
                .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
            Diagnostic::new(identifier, format!("rule faulted on {file}: {reason}"))
        })?;

        if let Some(severity) = self.config.rule_severity(identifier) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        Ok(violations)
    }

    /// Discovers lintable files under `roots` and lints them.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::NoLintableFiles`] if discovery finds nothing.
    pub fn lint_paths(
        &self,
        service: &dyn SyntaxService,
        roots: &[PathBuf],
    ) -> Result<LintResult, LintError> {
        let files = FileDiscovery::from_config(&self.config.linter).discover(roots);
        if files.is_empty() {
            return Err(LintError::NoLintableFiles {
                paths: roots.to_vec(),
            });
        }
        self.lint_files(service, &files)
    }

    /// Lints the given files on the worker pool.
    ///
    /// Unreadable files are skipped and reported as diagnostics. Violations
    /// are ordered by file, line, character and rule regardless of scheduling.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::NoLintableFiles`] if `files` is empty.
    pub fn lint_files(
        &self,
        service: &dyn SyntaxService,
        files: &[PathBuf],
    ) -> Result<LintResult, LintError> {
        if files.is_empty() {
            return Err(LintError::NoLintableFiles { paths: Vec::new() });
        }

        info!("Linting {} files with {} rules", files.len(), self.rules.len());

        let partials: Vec<LintResult> = self.install(|| {
            files
                .par_iter()
                .map(|path| {
                    debug!("Linting: {}", path.display());
                    match service.load(path) {
                        Ok(unit) => {
                            let report = self.check(&unit);
                            LintResult {
                                violations: report.violations,
                                files_checked: 1,
                                diagnostics: report.diagnostics,
                            }
                        }
                        Err(e) => {
                            warn!("Skipping {}: {}", path.display(), e);
                            LintResult {
                                diagnostics: vec![Diagnostic::new(
                                    path.display().to_string(),
                                    e.to_string(),
                                )],
                                ..LintResult::default()
                            }
                        }
                    }
                })
                .collect()
        });

        let mut result = LintResult::new();
        for partial in partials {
            result.extend(partial);
        }
        result.sort();

        info!(
            "Lint complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Lints in-memory contents, such as standard input.
    ///
    /// # Errors
    ///
    /// Returns an error if the syntax service cannot analyse the contents.
    pub fn lint_contents(
        &self,
        service: &dyn SyntaxService,
        contents: String,
    ) -> Result<LintResult, LintError> {
        let unit = service.parse(None, contents)?;
        let report = self.check(&unit);
        Ok(LintResult {
            violations: report.violations,
            files_checked: 1,
            diagnostics: report.diagnostics,
        })
    }

    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::rule::RuleDescriptor;
    use crate::types::{Location, Severity};

    macro_rules! test_rule {
        ($ty:ident, $id:literal) => {
            struct $ty;

            impl $ty {
                const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
                    identifier: $id,
                    name: $id,
                    description: "",
                    non_triggering_examples: &[],
                    triggering_examples: &[],
                };
            }
        };
    }

    test_rule!(EveryLine, "every_line");
    test_rule!(Faulty, "faulty");
    test_rule!(FirstLine, "a_first_line");

    impl Rule for EveryLine {
        fn descriptor(&self) -> &'static RuleDescriptor {
            &Self::DESCRIPTOR
        }

        fn validate(&self, unit: &SourceUnit, _config: &RuleConfig) -> Vec<Violation> {
            unit.lines()
                .iter()
                .rev()
                .map(|line| {
                    Violation::new(
                        self.identifier(),
                        Severity::Low,
                        Location::new(unit.location_path(), line.index).with_character(1),
                        "line",
                    )
                })
                .collect()
        }
    }

    impl Rule for Faulty {
        fn descriptor(&self) -> &'static RuleDescriptor {
            &Self::DESCRIPTOR
        }

        fn validate(&self, unit: &SourceUnit, _config: &RuleConfig) -> Vec<Violation> {
            let lines = unit.lines();
            // out-of-range access is the fault under test
            let beyond = &lines[lines.len() + 5];
            vec![Violation::new(
                self.identifier(),
                Severity::High,
                Location::new(None, beyond.index),
                "unreachable",
            )]
        }
    }

    impl Rule for FirstLine {
        fn descriptor(&self) -> &'static RuleDescriptor {
            &Self::DESCRIPTOR
        }

        fn validate(&self, unit: &SourceUnit, _config: &RuleConfig) -> Vec<Violation> {
            vec![Violation::new(
                self.identifier(),
                Severity::Medium,
                Location::new(unit.location_path(), 1).with_character(1),
                "first",
            )]
        }
    }

    fn linter(config: Config) -> Linter {
        Linter::builder()
            .rule(EveryLine)
            .rule(Faulty)
            .rule(FirstLine)
            .config(config)
            .build()
            .expect("linter should build")
    }

    #[test]
    fn test_builder() {
        let linter = linter(Config::default());
        assert_eq!(linter.rule_count(), 3);
    }

    #[test]
    fn test_violations_are_ordered() {
        let unit = SourceUnit::from_contents("a\nb\nc\n");
        let violations = linter(Config::default()).lint(&unit);
        let keys: Vec<(usize, &str)> = violations
            .iter()
            .map(|v| (v.location.line, v.rule.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (1, "a_first_line"),
                (1, "every_line"),
                (2, "every_line"),
                (3, "every_line"),
            ]
        );
    }

    #[test]
    fn test_faulting_rule_is_isolated() {
        let unit = SourceUnit::from_contents("a\n");
        let report = linter(Config::default()).check(&unit);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].subject, "faulty");
    }

    #[test]
    fn test_disabled_rule_and_severity_override() {
        let config = Config::parse(
            r#"
[rules.every_line]
enabled = false

[rules.a_first_line]
severity = "high"
"#,
        )
        .unwrap();
        let unit = SourceUnit::from_contents("a\nb\n");
        let violations = linter(config).lint(&unit);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::High);
    }

    #[test]
    fn test_suppression_directive() {
        let unit = SourceUnit::from_contents(
            "// tidemark:disable:next-line every_line\nb\n",
        );
        let violations = linter(Config::default()).lint(&unit);
        assert!(!violations
            .iter()
            .any(|v| v.location.line == 2 && v.rule == "every_line"));
        assert!(violations
            .iter()
            .any(|v| v.location.line == 1 && v.rule == "every_line"));
    }

    #[test]
    fn test_empty_file_list_is_an_error() {
        let linter = linter(Config::default());
        let err = linter
            .lint_files(&crate::SwiftSyntax::new(), &[])
            .expect_err("should fail");
        assert!(matches!(err, LintError::NoLintableFiles { .. }));
    }

    #[test]
    fn test_lint_contents_has_no_path() {
        let linter = linter(Config::default());
        let result = linter
            .lint_contents(&crate::SwiftSyntax::new(), "a\n".to_string())
            .unwrap();
        assert_eq!(result.files_checked, 1);
        assert!(result.violations.iter().all(|v| v.location.file.is_none()));
    }
}
