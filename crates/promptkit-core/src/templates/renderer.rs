//! Handlebars-based renderer for report exports.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled, so a
//! report template that references a field the caller forgot to supply fails
//! loudly instead of rendering a blank. HTML escaping is disabled because the
//! output is Markdown and saved prompts must appear exactly as generated.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::{embedded, renderer::ReportRenderer};
//!
//! let renderer = ReportRenderer::new();
//! let data = serde_json::json!({ "address": "0xabc...", "records": [] });
//! let output = renderer.render(embedded::HISTORY_MARKDOWN, &data)?;
//! ```

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{PromptKitError, Result};

/// Report renderer for Markdown exports.
pub struct ReportRenderer {
    hbs: Handlebars<'static>,
}

impl ReportRenderer {
    /// Create a new renderer with strict mode on and escaping off.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| PromptKitError::TemplateRender(e.to_string()))
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::embedded;

    #[test]
    fn test_render_history_report() {
        let data = serde_json::json!({
            "address": "0x0000000000000000000000000000000000000001",
            "network": "Irys",
            "count": 1,
            "records": [{
                "template_name": "Sales Email Generator",
                "prompt_id": "1-abc",
                "category": "Sales",
                "saved_at": "1700000000000",
                "generated_prompt": "Write <b>\"bold\"</b> & more",
            }],
        });
        let out = ReportRenderer::new()
            .render(embedded::HISTORY_MARKDOWN, &data)
            .unwrap();
        assert!(out.contains("## Sales Email Generator"));
        assert!(out.contains("Write <b>\"bold\"</b> & more"));
        assert!(out.contains("Prompts: 1"));
    }

    #[test]
    fn test_strict_mode_rejects_missing_field() {
        let result = ReportRenderer::new().render("{{missing}}", &serde_json::json!({}));
        assert!(matches!(result, Err(PromptKitError::TemplateRender(_))));
    }
}
