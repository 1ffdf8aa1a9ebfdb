//! tidemark CLI tool.
//!
//! Usage:
//! ```bash
//! tidemark lint [OPTIONS] [PATHS]...
//! tidemark index --cache-path index.json --directories Sources --paths Sources/A.swift
//! tidemark rules
//! tidemark init
//! ```
//!
//! Exit status: 0 when clean, 1 when violations meet the `--fail-on`
//! threshold, 2 on usage or runtime errors.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tidemark_core::Severity;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style linter for Swift sources
#[derive(Parser)]
#[command(name = "tidemark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print style violations for the given files and directories
    Lint {
        /// Files or directories to lint (default: current directory)
        paths: Vec<PathBuf>,

        /// Lint standard input instead of files
        #[arg(long, conflicts_with = "paths")]
        stdin: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated identifiers)
        #[arg(long, value_delimiter = ',')]
        rules: Vec<String>,

        /// Rule preset used when --rules is not given
        #[arg(long, default_value = "default")]
        preset: PresetArg,

        /// Lowest severity that fails the run
        #[arg(long)]
        fail_on: Option<Severity>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Number of worker threads (default: available parallelism)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Build or refresh the protocol declaration index
    Index {
        /// Path of the JSON index to read and write
        #[arg(long)]
        cache_path: Option<PathBuf>,

        /// Directories scanned in full when no usable index exists (comma-separated)
        #[arg(long, value_delimiter = ',')]
        directories: Vec<PathBuf>,

        /// Changed files to rescan (comma-separated)
        #[arg(long, value_delimiter = ',')]
        paths: Vec<PathBuf>,
    },

    /// List available rules
    Rules {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: RulesFormat,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Output format for the rule listing.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum RulesFormat {
    /// Table.
    #[default]
    Text,
    /// JSON array of rule descriptors.
    Json,
}

/// Rule preset selection.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum PresetArg {
    /// Every rule except opt-in rules.
    #[default]
    Default,
    /// Every built-in rule.
    All,
    /// Whitespace rules only.
    Minimal,
}

impl From<PresetArg> for tidemark_rules::Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Default => Self::Default,
            PresetArg::All => Self::All,
            PresetArg::Minimal => Self::Minimal,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let outcome = match cli.command {
        Commands::Lint {
            paths,
            stdin,
            format,
            rules,
            preset,
            fail_on,
            exclude,
            jobs,
        } => commands::lint::run(
            commands::lint::LintArgs {
                paths,
                stdin,
                format,
                rules,
                preset: preset.into(),
                fail_on,
                exclude,
                jobs,
            },
            config_path,
        ),
        Commands::Index {
            cache_path,
            directories,
            paths,
        } => commands::index::run(cache_path, directories, paths, config_path)
            .map(|()| ExitCode::SUCCESS),
        Commands::Rules { format } => commands::rules::run(format).map(|()| ExitCode::SUCCESS),
        Commands::Init { force } => commands::init::run(force).map(|()| ExitCode::SUCCESS),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
