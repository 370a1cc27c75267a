//! Compile-time embedded data files.
//!
//! Each constant loads a file from `templates/` via [`include_str!`]. The paths
//! are relative to this source file (`crates/promptkit-core/src/templates/embedded.rs`).
//!
//! Do NOT rename or move files under `templates/` without updating the path here.

/// Built-in prompt template catalog (JSON array of templates).
pub const BUILTIN_CATALOG: &str = include_str!("../../../../templates/catalog/builtin.json");

/// Markdown export of a wallet's saved prompts.
pub const HISTORY_MARKDOWN: &str = include_str!("../../../../templates/reports/history.md.hbs");
