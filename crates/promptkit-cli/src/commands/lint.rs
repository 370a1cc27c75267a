use std::path::Path;

use anyhow::Result;

use crate::output;

/// Report catalog diagnostics. Fails if any template has malformed markers.
pub fn run(config_path: &Path, all: bool) -> Result<()> {
    let ctx = super::load_context(config_path)?;
    output::print_header("promptkit lint");
    output::print_key_value("Templates", &ctx.catalog.len().to_string());

    let diagnostics = ctx.catalog.diagnostics();
    let malformed = diagnostics.iter().filter(|d| d.is_malformed()).count();

    for diagnostic in diagnostics {
        if diagnostic.is_malformed() {
            output::print_error(&diagnostic.to_string());
        } else if all {
            output::print_note(&diagnostic.to_string());
        }
    }

    let notes = diagnostics.len() - malformed;
    if notes > 0 && !all {
        output::print_key_value("Notes", &format!("{notes} (use --all to show)"));
    }

    if malformed > 0 {
        anyhow::bail!("{malformed} malformed marker(s) found");
    }
    output::print_success("No malformed templates");
    Ok(())
}
