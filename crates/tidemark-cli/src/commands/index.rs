//! Index command implementation.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tidemark_core::{FileDiscovery, IndexBuilder, SwiftSyntax};

/// Runs the index command.
pub fn run(
    cache_path: Option<PathBuf>,
    directories: Vec<PathBuf>,
    paths: Vec<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = crate::config_resolver::load(Path::new("."), config_path)?;
    let cache_path = cache_path
        .or_else(|| config.index.cache_path.clone())
        .context("No index path given: pass --cache-path or set [index] cache_path")?;

    let service = SwiftSyntax::new();
    let outcome = IndexBuilder::new(&service)
        .changed_paths(paths)
        .fallback_directories(directories)
        .discovery(FileDiscovery::from_config(&config.linter))
        .tracked_kind(config.index.tracked_kind)
        .run(&cache_path)
        .with_context(|| format!("Failed to build index at {}", cache_path.display()))?;

    for diagnostic in &outcome.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    println!(
        "Indexed {} declarations from {} scanned files{} into {}",
        outcome.index.len(),
        outcome.files_scanned.len(),
        if outcome.full_rescan { " (full rescan)" } else { "" },
        cache_path.display()
    );

    Ok(())
}
