//! CLI command implementations for promptkit.
//!
//! Each module corresponds to a subcommand (`promptkit <command>`).

pub mod generate;
pub mod history;
pub mod init;
pub mod lint;
pub mod list;
pub mod platforms;
pub mod save;
pub mod show;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use promptkit_core::catalog::Catalog;
use promptkit_core::config::Config;

/// Configuration plus the catalog it points at.
pub struct Context {
    pub config: Config,
    pub catalog: Catalog,
}

/// Load the config (or defaults) and the configured catalog.
pub fn load_context(config_path: &Path) -> Result<Context> {
    let config = Config::load_or_default(config_path)?.resolve_paths(config_path);
    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    Ok(Context { config, catalog })
}
