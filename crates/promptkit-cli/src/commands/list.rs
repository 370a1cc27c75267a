use std::path::Path;

use anyhow::Result;
use console::style;

use crate::output;

/// List templates, optionally restricted to one category.
pub fn run(config_path: &Path, category: Option<&str>) -> Result<()> {
    let ctx = super::load_context(config_path)?;

    let templates: Vec<_> = match category {
        Some(category) => ctx.catalog.by_category(category).collect(),
        None => ctx.catalog.templates().iter().collect(),
    };

    output::print_header(&match category {
        Some(category) => format!("Templates: {category}"),
        None => "Templates".to_string(),
    });

    if templates.is_empty() {
        output::print_warning("No templates match");
        output::print_key_value("Categories", &ctx.catalog.categories().join(", "));
        return Ok(());
    }

    for prepared in templates {
        let t = prepared.template();
        println!(
            "  {:<22} {}  {}",
            style(&t.id).bold(),
            t.name,
            style(format!("[{}] {}", t.category, t.ai_model)).dim()
        );
        if !t.description.is_empty() {
            println!("  {:<22} {}", "", style(&t.description).dim());
        }
    }
    println!();

    Ok(())
}
