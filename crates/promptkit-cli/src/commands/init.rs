use std::path::Path;

use anyhow::Result;

use promptkit_core::config::Config;

use crate::output;
use crate::NetworkChoice;

/// Write a default `promptkit.config.json`.
pub fn run(config_path: &Path, network: &NetworkChoice, force: bool) -> Result<()> {
    output::print_header("promptkit init");

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let config = Config {
        network: network.as_str().to_string(),
        ..Config::default()
    };
    config.save(config_path)?;

    output::print_success(&format!("Wrote {}", config_path.display()));
    output::print_key_value("Network", &config.network);
    output::print_key_value("Store", &config.store_dir.display().to_string());
    output::print_key_value("Default platform", &config.default_platform);
    println!();
    println!("  Next steps:");
    println!("    promptkit list");
    println!("    promptkit show deep-research");
    println!("    promptkit generate deep-research --interactive");
    println!();

    Ok(())
}
