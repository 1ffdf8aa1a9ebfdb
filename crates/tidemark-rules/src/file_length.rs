//! Rule limiting the number of lines in a file.
//!
//! # Configuration
//!
//! - `warning`: Most lines allowed before a medium violation (default: 400)
//! - `error`: Most lines allowed before a high violation (default: 1000)
//! - `ignore_comment_only_lines`: Do not count blank lines or lines holding only a `//` comment (default: false)

use tidemark_core::{Location, Rule, RuleConfig, RuleDescriptor, Severity, SourceUnit, Violation};

/// Rule identifier for file-length.
pub const IDENTIFIER: &str = "file_length";

const DEFAULT_WARNING: usize = 400;
const DEFAULT_ERROR: usize = 1000;

static DESCRIPTOR: RuleDescriptor = RuleDescriptor {
    identifier: IDENTIFIER,
    name: "File Length",
    description: "Files should not span too many lines.",
    non_triggering_examples: &["print(\"tidemark\")\n"],
    triggering_examples: &[],
};

/// Limits the number of lines per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLength;

impl FileLength {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for FileLength {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DESCRIPTOR
    }

    fn validate(&self, unit: &SourceUnit, config: &RuleConfig) -> Vec<Violation> {
        let warning = config.get_usize("warning", DEFAULT_WARNING);
        let error = config.get_usize("error", DEFAULT_ERROR);

        let lines = unit.lines();
        let count = if config.get_bool("ignore_comment_only_lines", false) {
            lines
                .iter()
                .filter(|line| {
                    let text = line.text.trim();
                    !text.is_empty() && !text.starts_with("//")
                })
                .count()
        } else {
            lines.len()
        };

        let (severity, limit) = if count > error {
            (Severity::High, error)
        } else if count > warning {
            (Severity::Medium, warning)
        } else {
            return Vec::new();
        };

        vec![Violation::new(
            IDENTIFIER,
            severity,
            Location::new(unit.location_path(), lines.len()),
            format!("File should contain {limit} lines or less: currently contains {count}"),
        )]
    }
}
