//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# tidemark configuration

[linter]
# Extension of lintable files
extension = "swift"

# Glob patterns to exclude from linting
exclude = [
    "**/Pods/**",
    "**/Carthage/**",
    "**/.build/**",
]

# Respect .gitignore files
respect_gitignore = true

# Lowest severity that makes `tidemark lint` exit with status 1
fail_on = "low"

# Worker threads (default: available parallelism)
# jobs = 4

[index]
# Declarations recorded by `tidemark index`
tracked_kind = "protocol"
# cache_path = ".tidemark/index.json"

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.line_length]
warning = 120
error = 200

[rules.file_length]
warning = 400
error = 1000

[rules.trailing_whitespace]
ignores_empty_lines = false

# Opt-in rule
# [rules.multiline_arguments]
# enabled = true
# first_argument_location = "any_line"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("tidemark.toml"), force)?;

    println!("Created tidemark.toml");
    println!("\nNext steps:");
    println!("  1. Edit tidemark.toml to configure rules");
    println!("  2. Run: tidemark lint");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidemark_core::{Config, DeclarationKind, Severity};

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.linter.extension, "swift");
        assert_eq!(config.linter.fail_on, Severity::Low);
        assert_eq!(config.index.tracked_kind, DeclarationKind::Protocol);
        assert_eq!(config.rule_config("line_length").get_usize("warning", 0), 120);
        assert!(!config.rules.contains_key("multiline_arguments"));
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tidemark.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
