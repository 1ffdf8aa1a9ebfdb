//! Persisted cross-file declaration index.
//!
//! The index maps declaration names (protocols by default) to the absolute
//! path of the file that defines them. It is persisted as a flat JSON object
//! and rebuilt incrementally: only changed files are rescanned and their
//! declarations merged into the previously persisted index.
//!
//! Conflicts resolve as last write wins in lexicographic path order. Entries
//! whose defining file disappeared are not pruned.

use crate::discovery::FileDiscovery;
use crate::source::{DeclarationKind, SourceUnit};
use crate::syntax::SyntaxService;
use crate::types::Diagnostic;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that make an index build fail as a whole.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index could not be written to its target path.
    #[error("Failed to persist index to {path}: {source}")]
    Persist {
        /// Target path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The index could not be serialized.
    #[error("Failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Mapping from declaration name to defining file path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationIndex {
    entries: BTreeMap<String, String>,
}

/// Outcome of reading a persisted index.
#[derive(Debug)]
pub enum IndexLoad {
    /// A well-formed index was read.
    Loaded(DeclarationIndex),
    /// No index exists at the path.
    Missing,
    /// The file exists but is unreadable or not a flat string-to-string object.
    Corrupt(String),
}

impl IndexLoad {
    /// Returns the loaded index, if any.
    #[must_use]
    pub fn into_index(self) -> Option<DeclarationIndex> {
        match self {
            Self::Loaded(index) => Some(index),
            Self::Missing | Self::Corrupt(_) => None,
        }
    }
}

impl DeclarationIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the file defining `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterates over `(name, path)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Records `name` as defined in `path`, returning the previous path.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), path.into())
    }

    /// Merges scanned `(name, path)` pairs into the index in iteration order.
    ///
    /// Later pairs overwrite earlier ones and existing entries; names that are
    /// not mentioned keep their current path.
    #[must_use]
    pub fn merge<I, K, V>(mut self, scanned: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, path) in scanned {
            self.insert(name, path);
        }
        self
    }

    /// Parses an index from JSON.
    ///
    /// # Errors
    ///
    /// Fails unless the JSON is an object whose values are all strings.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the index as pretty-printed JSON with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, IndexError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Reads a persisted index.
    #[must_use]
    pub fn load(path: &Path) -> IndexLoad {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return IndexLoad::Missing,
            Err(e) => return IndexLoad::Corrupt(e.to_string()),
        };
        match Self::from_json(&content) {
            Ok(index) => IndexLoad::Loaded(index),
            Err(e) => IndexLoad::Corrupt(e.to_string()),
        }
    }

    /// Writes the index to `path` atomically.
    ///
    /// The JSON is written to a temporary file next to the target and then
    /// renamed over it, so readers never observe a partial file.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Persist`] if the target directory is not writable.
    pub fn persist(&self, path: &Path) -> Result<(), IndexError> {
        let json = self.to_json()?;
        let persist_err = |source: std::io::Error| IndexError::Persist {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(persist_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(persist_err)?;
        tmp.write_all(json.as_bytes()).map_err(persist_err)?;
        tmp.as_file().sync_all().map_err(persist_err)?;
        tmp.persist(path).map_err(|e| persist_err(e.error))?;

        debug!("Persisted {} entries to {}", self.len(), path.display());
        Ok(())
    }
}

/// Names of every node of `kind` in the unit's structure tree.
#[must_use]
pub fn tracked_declarations(unit: &SourceUnit, kind: DeclarationKind) -> Vec<String> {
    unit.structure()
        .walk()
        .filter(|node| node.kind == kind)
        .filter_map(|node| node.name.clone())
        .collect()
}

/// Result of an index build.
#[derive(Debug)]
pub struct IndexOutcome {
    /// The merged index.
    pub index: DeclarationIndex,
    /// Files scanned, in merge order.
    pub files_scanned: Vec<PathBuf>,
    /// Whether the build ignored the previous index and rescanned everything.
    pub full_rescan: bool,
    /// Files that could not be scanned.
    pub diagnostics: Vec<Diagnostic>,
}

/// Scans files for declarations and merges them into a [`DeclarationIndex`].
pub struct IndexBuilder<'s> {
    service: &'s dyn SyntaxService,
    changed: Vec<PathBuf>,
    fallback_directories: Vec<PathBuf>,
    discovery: FileDiscovery,
    tracked_kind: DeclarationKind,
}

impl<'s> IndexBuilder<'s> {
    /// Creates a builder that materialises files through `service`.
    #[must_use]
    pub fn new(service: &'s dyn SyntaxService) -> Self {
        Self {
            service,
            changed: Vec::new(),
            fallback_directories: Vec::new(),
            discovery: FileDiscovery::default(),
            tracked_kind: DeclarationKind::Protocol,
        }
    }

    /// Adds explicitly changed files (or directories); always scanned.
    #[must_use]
    pub fn changed_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.changed.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds directories scanned in full when no usable index exists.
    #[must_use]
    pub fn fallback_directories<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.fallback_directories
            .extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Sets how files are discovered inside directories.
    #[must_use]
    pub fn discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Sets the declaration kind recorded in the index.
    #[must_use]
    pub fn tracked_kind(mut self, kind: DeclarationKind) -> Self {
        self.tracked_kind = kind;
        self
    }

    /// Builds an index on top of `existing`.
    ///
    /// With no existing index every fallback directory is rescanned as well
    /// as the changed paths. Nothing is persisted.
    #[must_use]
    pub fn build(&self, existing: Option<DeclarationIndex>) -> IndexOutcome {
        let full_rescan = existing.is_none();
        let mut roots = self.changed.clone();
        if full_rescan {
            roots.extend(self.fallback_directories.iter().cloned());
        }
        let files = self.discovery.discover(&roots);

        info!(
            "Scanning {} files for declarations (full rescan: {})",
            files.len(),
            full_rescan
        );

        let scanned: Vec<(&PathBuf, Result<Vec<String>, Diagnostic>)> = files
            .par_iter()
            .map(|path| (path, self.scan_file(path)))
            .collect();

        let mut diagnostics = Vec::new();
        let mut found = Vec::new();
        for (path, result) in scanned {
            match result {
                Ok(names) => {
                    let path = path.to_string_lossy().into_owned();
                    found.extend(names.into_iter().map(|name| (name, path.clone())));
                }
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        let index = existing.unwrap_or_default().merge(found);

        IndexOutcome {
            index,
            files_scanned: files,
            full_rescan,
            diagnostics,
        }
    }

    fn scan_file(&self, path: &Path) -> Result<Vec<String>, Diagnostic> {
        debug!("Scanning: {}", path.display());
        match self.service.load(path) {
            Ok(unit) => Ok(tracked_declarations(&unit, self.tracked_kind)),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                Err(Diagnostic::new(path.display().to_string(), e.to_string()))
            }
        }
    }

    /// Loads the index at `cache_path`, builds on it and persists the result.
    ///
    /// A missing or corrupt index forces a full rescan.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged index cannot be persisted.
    pub fn run(&self, cache_path: &Path) -> Result<IndexOutcome, IndexError> {
        let existing = match DeclarationIndex::load(cache_path) {
            IndexLoad::Loaded(index) => {
                debug!("Loaded {} entries from {}", index.len(), cache_path.display());
                Some(index)
            }
            IndexLoad::Missing => {
                info!("No index at {}, rebuilding", cache_path.display());
                None
            }
            IndexLoad::Corrupt(reason) => {
                warn!(
                    "Ignoring corrupt index at {}: {}",
                    cache_path.display(),
                    reason
                );
                None
            }
        };

        let outcome = self.build(existing);
        outcome.index.persist(cache_path)?;

        info!(
            "Index written to {}: {} entries from {} scanned files",
            cache_path.display(),
            outcome.index.len(),
            outcome.files_scanned.len()
        );

        Ok(outcome)
    }
}
