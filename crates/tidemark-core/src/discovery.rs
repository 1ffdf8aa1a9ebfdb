//! Lintable file discovery.

use crate::config::LinterConfig;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Expands files and directories into the sorted set of lintable files.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    extension: String,
    exclude_patterns: Vec<String>,
    respect_gitignore: bool,
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::from_config(&LinterConfig::default())
    }
}

impl FileDiscovery {
    /// Creates a discovery for files with `extension` (without the dot).
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            exclude_patterns: Vec::new(),
            respect_gitignore: true,
        }
    }

    /// Creates a discovery from linter configuration.
    #[must_use]
    pub fn from_config(config: &LinterConfig) -> Self {
        Self::new(config.extension.clone())
            .excludes(config.exclude.iter().cloned())
            .respect_gitignore(config.respect_gitignore)
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets whether `.gitignore` files are honoured.
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Returns every lintable file under `roots` as sorted, de-duplicated absolute paths.
    ///
    /// Files are taken as-is when they carry the extension; directories are
    /// walked recursively. Missing paths are skipped.
    #[must_use]
    pub fn discover(&self, roots: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for root in roots {
            let root = absolute(root);
            if root.is_dir() {
                self.walk(&root, &mut files);
            } else if root.is_file() {
                if self.is_lintable(&root) {
                    files.push(root);
                }
            } else {
                debug!("Skipping missing path: {}", root.display());
            }
        }
        files.sort();
        files.dedup();
        files
    }

    fn walk(&self, root: &Path, files: &mut Vec<PathBuf>) {
        let walker = ignore::WalkBuilder::new(root)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_some_and(|t| t.is_file()) && self.is_lintable(path) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => warn!("Failed to walk {}: {}", root.display(), e),
            }
        }
    }

    fn is_lintable(&self, path: &Path) -> bool {
        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.extension);
        if !matches_extension {
            return false;
        }
        if self.should_exclude(path) {
            debug!("Excluding: {}", path.display());
            return false;
        }
        true
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/Generated/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty()
                && normalized_pattern != "/"
                && path_str.contains(&normalized_pattern)
            {
                return true;
            }
        }

        false
    }
}

/// Makes `path` absolute relative to the current directory, dropping `.`
/// components.
#[must_use]
pub fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => {
                warn!("Cannot resolve current directory: {}", e);
                path.to_path_buf()
            }
        }
    };
    joined
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
