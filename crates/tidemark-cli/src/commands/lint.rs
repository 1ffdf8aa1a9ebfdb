//! Lint command implementation.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tidemark_core::{Config, SwiftSyntax, Linter, RuleBox, Severity};
use tidemark_rules::{Preset, RuleCatalog};
use tracing::info;

use crate::OutputFormat;

/// Arguments of the lint command.
pub struct LintArgs {
    /// Files or directories to lint.
    pub paths: Vec<PathBuf>,
    /// Read the source from standard input.
    pub stdin: bool,
    /// Output format.
    pub format: OutputFormat,
    /// Explicit rule identifiers; overrides the preset.
    pub rules: Vec<String>,
    /// Preset used when no rules are named.
    pub preset: Preset,
    /// Failure threshold override.
    pub fail_on: Option<Severity>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Worker thread override.
    pub jobs: Option<usize>,
}

/// Runs the lint command.
pub fn run(args: LintArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let mut config = crate::config_resolver::load(Path::new("."), config_path)?;
    config.linter.exclude.extend(args.exclude);
    if args.jobs.is_some() {
        config.linter.jobs = args.jobs;
    }
    if let Some(fail_on) = args.fail_on {
        config.linter.fail_on = fail_on;
    }
    let fail_on = config.linter.fail_on;

    let rules = select_rules(&args.rules, args.preset, &config)?;
    let linter = Linter::builder()
        .rules(rules)
        .config(config)
        .build()
        .context("Failed to build linter")?;
    let service = SwiftSyntax::new();

    let result = if args.stdin {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read standard input")?;
        linter.lint_contents(&service, contents)?
    } else {
        let paths = if args.paths.is_empty() {
            info!("Linting Swift files in current working directory");
            vec![PathBuf::from(".")]
        } else {
            info!("Linting Swift files at paths {}", display_paths(&args.paths));
            args.paths
        };
        linter.lint_paths(&service, &paths)?
    };

    super::output::print(&result, args.format)?;

    if result.has_violations_at(fail_on) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Chooses the rules to run.
///
/// Named rules win. Otherwise the preset is used, plus any catalog rule the
/// configuration enables explicitly.
fn select_rules(names: &[String], preset: Preset, config: &Config) -> Result<Vec<RuleBox>> {
    let catalog = RuleCatalog::builtin();
    if !names.is_empty() {
        return Ok(catalog.select(names)?);
    }

    let mut rules = preset.rules();
    for identifier in catalog.identifiers() {
        let opted_in = config
            .rules
            .get(identifier)
            .and_then(|rule| rule.enabled)
            .unwrap_or(false);
        if opted_in && !rules.iter().any(|r| r.identifier() == identifier) {
            rules.extend(catalog.create(identifier));
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.identifier()).collect()
    }

    #[test]
    fn test_named_rules_override_preset() {
        let rules = select_rules(
            &["type_name".to_string()],
            Preset::All,
            &Config::default(),
        )
        .unwrap();
        assert_eq!(ids(&rules), vec!["type_name"]);
    }

    #[test]
    fn test_unknown_rule_is_an_error() {
        let err = select_rules(&["nope".to_string()], Preset::Default, &Config::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unknown rule 'nope'"));
    }

    #[test]
    fn test_config_opts_in_rules() {
        let config = Config::parse("[rules.multiline_arguments]\nenabled = true\n").unwrap();
        let rules = select_rules(&[], Preset::Minimal, &config).unwrap();
        assert_eq!(
            ids(&rules),
            vec!["trailing_newline", "trailing_whitespace", "multiline_arguments"]
        );
    }
}
