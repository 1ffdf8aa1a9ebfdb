//! Shared output formatting for lint results.

use anyhow::Result;
use std::fmt::Write as _;
use std::io::IsTerminal;
use tidemark_core::{LintResult, Severity};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let color = std::io::stdout().is_terminal();
    print!("{}", render(result, format, color)?);
    Ok(())
}

/// Renders lint results in the specified format.
pub fn render(result: &LintResult, format: OutputFormat, color: bool) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(result, color),
        OutputFormat::Json => render_json(result)?,
        OutputFormat::Compact => render_compact(result),
    })
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn render_text(result: &LintResult, color: bool) -> String {
    let (high, medium, low) = result.count_by_severity();
    let mut out = String::new();

    for violation in &result.violations {
        let severity = violation.severity.to_string();
        let indicator = match violation.severity {
            Severity::High => paint(&severity, "31", color),
            Severity::Medium => paint(&severity, "33", color),
            Severity::Low => paint(&severity, "34", color),
        };
        let _ = writeln!(out, "{} at {}", violation.rule, violation.location);
        let _ = writeln!(out, "  {}: {}", indicator, violation.reason);
        out.push('\n');
    }

    for diagnostic in &result.diagnostics {
        let _ = writeln!(out, "{} {}", paint("skipped", "35", color), diagnostic);
    }
    if !result.diagnostics.is_empty() {
        out.push('\n');
    }

    let summary_color = if high > 0 {
        "31"
    } else if medium + low > 0 {
        "33"
    } else {
        "32"
    };
    let mut summary = format!(
        "{} ({} high, {} medium, {} low",
        result.summary(),
        high,
        medium,
        low
    );
    match result.diagnostics.len() {
        0 => {}
        1 => summary.push_str(", 1 diagnostic"),
        n => {
            let _ = write!(summary, ", {n} diagnostics");
        }
    }
    summary.push(')');
    let _ = writeln!(out, "{}", paint(&summary, summary_color, color));
    out
}

fn render_json(result: &LintResult) -> Result<String> {
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    Ok(json)
}

fn render_compact(result: &LintResult) -> String {
    let violations = result
        .violations
        .iter()
        .map(|violation| format!("{violation}\n"));
    let diagnostics = result
        .diagnostics
        .iter()
        .map(|diagnostic| format!("{}: skipped {}\n", diagnostic.subject, diagnostic.message));
    violations.chain(diagnostics).collect()
}
