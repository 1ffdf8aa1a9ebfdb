//! Syntax service seam: turns file contents into [`SourceUnit`]s.

use crate::source::{DeclarationNode, SourceUnit};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while materialising a [`SourceUnit`].
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("{path} is not valid UTF-8")]
    Encoding {
        /// Offending path.
        path: PathBuf,
    },

    /// The structure extractor rejected the contents.
    #[error("Structure extraction failed: {message}")]
    Extraction {
        /// Extractor message.
        message: String,
    },
}

/// Produces structure trees for source contents.
///
/// Implement this to plug in a real parser. The linter and the index builder
/// receive it as an explicit parameter.
pub trait SyntaxService: Send + Sync {
    /// Builds the file-scope structure tree for `contents`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Extraction`] if the contents cannot be analysed.
    fn structure(&self, contents: &str) -> Result<DeclarationNode, SyntaxError>;

    /// Builds a [`SourceUnit`] from in-memory contents.
    ///
    /// # Errors
    ///
    /// Propagates extraction failures from [`SyntaxService::structure`].
    fn parse(&self, path: Option<PathBuf>, contents: String) -> Result<SourceUnit, SyntaxError> {
        let structure = self.structure(&contents)?;
        Ok(SourceUnit::new(path, contents, structure))
    }

    /// Reads `path` and builds its [`SourceUnit`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not UTF-8, or cannot be analysed.
    fn load(&self, path: &Path) -> Result<SourceUnit, SyntaxError> {
        let bytes = std::fs::read(path).map_err(|source| SyntaxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let contents = String::from_utf8(bytes).map_err(|_| SyntaxError::Encoding {
            path: path.to_path_buf(),
        })?;
        self.parse(Some(path.to_path_buf()), contents)
    }
}
