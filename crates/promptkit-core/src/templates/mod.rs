//! Embedded data files and report rendering.
//!
//! Data files are embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module. Report templates are rendered at runtime with
//! [Handlebars](https://handlebarsjs.com/) via the [`renderer::ReportRenderer`].
//!
//! Prompt templates in the catalog are *not* Handlebars templates; they are
//! interpreted by [`crate::engine`].
//!
//! **Warning**: files in `templates/` and constants in [`embedded`] must stay in sync.
//! The `include_str!` paths are relative to this file and checked at compile-time.

pub mod embedded;
pub mod renderer;
