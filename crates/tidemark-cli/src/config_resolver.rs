//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/tidemark.toml` or `.tidemark.toml`
//! 3. `$TIDEMARK_CONFIG_DIR/config.toml` or `~/.tidemark/config.toml` (global fallback)
//! 4. No config found → defaults

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tidemark_core::Config;

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.tidemark/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["tidemark.toml", ".tidemark.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        })
}

/// Returns the global config directory path.
///
/// Resolution: `$TIDEMARK_CONFIG_DIR` > `~/.tidemark/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("TIDEMARK_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".tidemark"))
}

/// Resolves and loads the configuration, falling back to defaults.
///
/// # Errors
///
/// Returns an error if a resolved config file cannot be read or parsed.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    let source = resolve(project_dir, explicit);
    let Some(path) = source.path() else {
        tracing::debug!("No configuration found, using defaults");
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_without_existence_check() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("tidemark.toml"), "").unwrap();

        let result = resolve_inner(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_names_checked_in_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".tidemark.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".tidemark.toml"))
        );

        fs::write(tmp.path().join("tidemark.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("tidemark.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_dir = Some(global.path().to_path_buf());

        assert_eq!(
            resolve_inner(project.path(), None, global_dir.clone()),
            ConfigSource::Default
        );

        fs::write(global.path().join("config.toml"), "").unwrap();
        let result = resolve_inner(project.path(), None, global_dir.clone());
        assert!(result.is_global());
        assert_eq!(result.path(), Some(global.path().join("config.toml").as_path()));

        fs::write(project.path().join("tidemark.toml"), "").unwrap();
        assert!(matches!(
            resolve_inner(project.path(), None, global_dir),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn load_parses_project_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("tidemark.toml"),
            "[linter]\njobs = 2\n\n[rules.line_length]\nwarning = 90\n",
        )
        .unwrap();

        let config = load(tmp.path(), None).unwrap();
        assert_eq!(config.linter.jobs, Some(2));
        assert_eq!(config.rule_config("line_length").get_usize("warning", 120), 90);
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let err = load(tmp.path(), Some(&tmp.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
