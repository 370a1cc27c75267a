//! Unified error types for the promptkit toolkit.
//!
//! The substitution engine itself is total and never returns these; they come
//! from catalog loading, configuration, the launcher, and the prompt store.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during promptkit operations.
#[derive(Error, Debug)]
pub enum PromptKitError {
    // --- Configuration ---

    /// The configuration file (`promptkit.config.json`) could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The specified network name is not one of: `mainnet`, `testnet`.
    #[error("unknown network: {0} (supported: mainnet, testnet)")]
    UnknownNetwork(String),

    // --- Catalog ---

    /// A catalog file could not be read.
    #[error("catalog not found at {path}")]
    CatalogNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not valid JSON or does not match the template schema.
    #[error("failed to parse catalog {origin}")]
    CatalogParse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two templates in one catalog share the same id.
    #[error("duplicate template id: {0}")]
    DuplicateTemplate(String),

    /// Two variables in one template declare the same key.
    #[error("template '{template}' declares variable '{key}' more than once")]
    DuplicateVariable { template: String, key: String },

    /// A template breaks a structural rule (empty id, select without options).
    #[error("invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// No template with the given id exists in the catalog.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    // --- Launcher ---

    /// The AI platform id is not in the built-in platform list.
    #[error("unknown AI platform: {0}")]
    UnknownPlatform(String),

    /// A required external tool (clipboard helper, URL opener) is not installed.
    #[error("required tool '{name}' not found; install: {install}")]
    MissingTool { name: String, install: String },

    /// An external tool ran but exited with an error.
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    // --- Wallet / store ---

    /// A save was attempted without a connected wallet.
    #[error("wallet not connected")]
    WalletNotConnected,

    /// The wallet address is not `0x` followed by 40 hex characters.
    #[error("invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    /// The wallet is connected to a chain that is not a supported network.
    #[error("wallet is on chain {chain_id}; please switch to Irys Network to save prompts")]
    WrongNetwork { chain_id: u64 },

    /// A prompt store file exists but cannot be decoded.
    #[error("prompt store at {path} is corrupt")]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Reports ---

    /// Handlebars rendering of a report failed (invalid template or missing variables).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, PromptKitError>`.
pub type Result<T> = std::result::Result<T, PromptKitError>;
