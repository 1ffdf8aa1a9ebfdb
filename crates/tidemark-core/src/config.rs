//! Configuration types for tidemark.

use crate::source::DeclarationKind;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Top-level configuration, usually loaded from `tidemark.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Linter configuration.
    #[serde(default)]
    pub linter: LinterConfig,

    /// Declaration index configuration.
    #[serde(default)]
    pub index: IndexConfig,

    /// Per-rule configurations keyed by rule identifier.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. Rules are enabled unless configured otherwise.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        self.rules
            .get(rule)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule: &str) -> Option<Severity> {
        self.rules.get(rule).and_then(|c| c.severity)
    }

    /// Gets the options for a rule, or an empty configuration.
    #[must_use]
    pub fn rule_config(&self, rule: &str) -> &RuleConfig {
        static EMPTY: OnceLock<RuleConfig> = OnceLock::new();
        self.rules
            .get(rule)
            .unwrap_or_else(|| EMPTY.get_or_init(RuleConfig::default))
    }
}

/// Linter-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Extension of files to lint and index (without the dot).
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Glob patterns to exclude from discovery.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files during discovery.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of files processed in parallel (default: available parallelism).
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Violations at or above this severity make a lint run fail.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            exclude: Vec::new(),
            respect_gitignore: true,
            jobs: None,
            fail_on: default_fail_on(),
        }
    }
}

/// Declaration index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Declaration kind recorded in the index.
    #[serde(default = "default_tracked_kind")]
    pub tracked_kind: DeclarationKind,

    /// Default location of the persisted index.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            tracked_kind: default_tracked_kind(),
            cache_path: None,
        }
    }
}

fn default_extension() -> String {
    "swift".to_string()
}

fn default_true() -> bool {
    true
}

fn default_fail_on() -> Severity {
    Severity::Low
}

fn default_tracked_kind() -> DeclarationKind {
    DeclarationKind::Protocol
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Builds a configuration from option pairs, mainly for tests and embedding.
    #[must_use]
    pub fn with_options<I, K>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, toml::Value)>,
        K: Into<String>,
    {
        Self {
            options: options.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Self::default()
        }
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a non-negative integer option with a default value.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets an enumerated option, falling back to `T::default()` when the
    /// value is missing or not one of the accepted spellings.
    #[must_use]
    pub fn get_choice<T>(&self, key: &str) -> T
    where
        T: std::str::FromStr + Default,
    {
        match self.options.get(key).and_then(|v| v.as_str()) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unsupported value '{}' for option '{}'", raw, key);
                T::default()
            }),
            None => T::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
