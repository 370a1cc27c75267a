//! `promptkit.config.json` loading and saving.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PromptKitError, Result};
use crate::network::Network;
use crate::platform::AiPlatform;

/// Default file name looked up in the working directory.
pub const CONFIG_FILE: &str = "promptkit.config.json";

/// User configuration. Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding saved prompt history.
    pub store_dir: PathBuf,
    /// Network name, see [`Network::from_name`].
    pub network: String,
    /// Platform id opened by `generate --open` without an argument.
    pub default_platform: String,
    /// Custom catalog replacing the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(".promptkit/prompts"),
            network: "mainnet".into(),
            default_platform: "chatgpt".into(),
            catalog: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PromptKitError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| PromptKitError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| PromptKitError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject unknown network or platform names.
    pub fn validate(&self) -> Result<()> {
        self.network()?;
        AiPlatform::from_id(&self.default_platform)?;
        Ok(())
    }

    pub fn network(&self) -> Result<Network> {
        Network::from_name(&self.network)
            .ok_or_else(|| PromptKitError::UnknownNetwork(self.network.clone()))
    }

    /// Resolve relative paths against the directory containing the config file.
    pub fn resolve_paths(mut self, config_path: &Path) -> Self {
        let base = config_path.parent().unwrap_or(Path::new("."));
        if self.store_dir.is_relative() {
            self.store_dir = base.join(&self.store_dir);
        }
        if let Some(catalog) = self.catalog.take() {
            self.catalog = Some(if catalog.is_relative() {
                base.join(catalog)
            } else {
                catalog
            });
        }
        self
    }
}
