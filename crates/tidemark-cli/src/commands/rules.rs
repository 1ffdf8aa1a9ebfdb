//! Rules command implementation.

use anyhow::Result;
use serde::Serialize;
use tidemark_core::RuleDescriptor;
use tidemark_rules::{default_rules, RuleCatalog};

use crate::RulesFormat;

#[derive(Serialize)]
struct RuleListing {
    #[serde(flatten)]
    descriptor: &'static RuleDescriptor,
    enabled_by_default: bool,
}

fn listings() -> Vec<RuleListing> {
    let defaults: Vec<&str> = default_rules().iter().map(|r| r.identifier()).collect();
    RuleCatalog::builtin()
        .descriptors()
        .into_iter()
        .map(|descriptor| RuleListing {
            descriptor,
            enabled_by_default: defaults.contains(&descriptor.identifier),
        })
        .collect()
}

/// Runs the rules command.
pub fn run(format: RulesFormat) -> Result<()> {
    match format {
        RulesFormat::Text => print!("{}", render_text()),
        RulesFormat::Json => println!("{}", serde_json::to_string_pretty(&listings())?),
    }
    Ok(())
}

fn render_text() -> String {
    let mut out = String::from("Available rules:\n\n");
    out.push_str(&format!("{:<22} {:<8} Description\n", "Identifier", "Default"));
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for listing in listings() {
        out.push_str(&format!(
            "{:<22} {:<8} {}\n",
            listing.descriptor.identifier,
            if listing.enabled_by_default { "yes" } else { "no" },
            listing.descriptor.description
        ));
    }

    out.push_str("\nPresets:\n");
    out.push_str("  default  - every rule marked as default\n");
    out.push_str("  all      - every rule\n");
    out.push_str("  minimal  - trailing_newline, trailing_whitespace\n");
    out.push_str("\nUse --rules to run specific rules, e.g.:\n");
    out.push_str("  tidemark lint --rules line_length,trailing_whitespace\n");
    out
}
