//! Core library for the promptkit toolkit.
//!
//! The heart of the crate is the [`engine`]: a pure substitution engine that
//! turns a [`template::Template`] and a value map into a finished prompt, plus a
//! validator for required fields. Around it sit the shared pieces the CLI needs:
//! the template [`catalog`], per-interaction [`session`] state, configuration,
//! the local prompt [`store`] gated on a [`wallet`], and the clipboard/browser
//! [`launcher`].
//!
//! The engine is synchronous and allocation-only; it can be called from any
//! thread or async task.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod launcher;
pub mod network;
pub mod platform;
pub mod session;
pub mod store;
pub mod template;
pub mod templates;
pub mod wallet;

pub use engine::{generate, validate, PreparedTemplate, Validation};
pub use template::{Template, Values, Variable, VariableKind};
