use std::path::Path;

use anyhow::Result;
use console::style;

use crate::output;

/// Describe one template: metadata, variables, and tips.
pub fn run(config_path: &Path, id: &str) -> Result<()> {
    let ctx = super::load_context(config_path)?;
    let t = ctx.catalog.require(id)?.template();

    output::print_header(&t.name);
    if !t.description.is_empty() {
        println!("{}\n", t.description);
    }
    output::print_key_value("Id", &t.id);
    output::print_key_value("Category", &t.category);
    output::print_key_value("Works with", &t.ai_model);

    println!("\n{}", style("Variables").bold());
    for v in &t.variables {
        let required = if v.required {
            style("required").red().to_string()
        } else {
            style("optional").dim().to_string()
        };
        println!("  {} ({}, {required}) — {}", style(&v.key).bold(), v.kind.as_str(), v.label);
        if let Some(description) = &v.description {
            println!("      {}", style(description).dim());
        }
        if !v.options.is_empty() {
            println!("      options: {}", v.options.join(" | "));
        }
        if let Some(default) = &v.default_value {
            println!("      default: {default}");
        }
        if let Some(placeholder) = &v.placeholder {
            println!("      {}", style(placeholder).italic().dim());
        }
    }

    if !t.tips.is_empty() {
        println!("\n{}", style("Tips").bold());
        for tip in &t.tips {
            println!("  * {tip}");
        }
    }
    println!();

    Ok(())
}
