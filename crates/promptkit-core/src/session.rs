//! Interaction state: the selected template and the values typed so far.
//!
//! A session borrows its template from the [`Catalog`](crate::catalog::Catalog);
//! choosing a different template means starting a new session.

use crate::engine::{PreparedTemplate, Validation};
use crate::template::{Template, Values};

#[derive(Debug, Clone)]
pub struct Session<'a> {
    template: &'a PreparedTemplate,
    values: Values,
}

impl<'a> Session<'a> {
    /// Start a session with every variable set to its default (or empty).
    pub fn start(template: &'a PreparedTemplate) -> Self {
        Self {
            values: template.template().default_values(),
            template,
        }
    }

    pub fn template(&self) -> &Template {
        self.template.template()
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Record a value. Keys the template does not declare are kept but never substituted.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Merge many values at once, later entries winning.
    pub fn extend<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in values {
            self.set(k, v);
        }
    }

    /// Back to defaults.
    pub fn reset(&mut self) {
        self.values = self.template.template().default_values();
    }

    pub fn validate(&self) -> Validation {
        self.template.validate(&self.values)
    }

    pub fn generate(&self) -> String {
        let prompt = self.template.generate(&self.values);
        let template = self.template.template();
        tracing::info!(
            event = "prompt_generated",
            template_name = %template.name,
            category = %template.category,
            ai_model = %template.ai_model,
            chars = prompt.len()
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Variable;

    fn prepared() -> PreparedTemplate {
        let mut tone = Variable::text("tone", "Tone", true);
        tone.default_value = Some("friendly".into());
        PreparedTemplate::new(Template::new(
            "t",
            "Write to {{name}} in a {{tone}} tone.{{#if ps}} P.S. {{ps}}{{/if}}",
            vec![Variable::text("name", "Name", true), tone, Variable::text("ps", "P.S.", false)],
        ))
    }

    #[test]
    fn test_start_seeds_defaults() {
        let t = prepared();
        let session = Session::start(&t);
        assert_eq!(session.value("tone"), "friendly");
        assert_eq!(session.value("name"), "");
        assert_eq!(session.validate().errors, vec!["Name is required"]);
    }

    #[test]
    fn test_set_and_generate() {
        let t = prepared();
        let mut session = Session::start(&t);
        session.set("name", "Ada");
        assert!(session.validate().is_valid);
        assert_eq!(session.generate(), "Write to Ada in a friendly tone.");

        session.extend([("ps", "see you"), ("tone", "formal")]);
        assert_eq!(session.generate(), "Write to Ada in a formal tone. P.S. see you");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let t = prepared();
        let mut session = Session::start(&t);
        session.extend([("name", "Ada"), ("tone", "curt")]);
        session.reset();
        assert_eq!(session.value("name"), "");
        assert_eq!(session.value("tone"), "friendly");
    }

    #[test]
    fn test_undeclared_value_ignored() {
        let t = prepared();
        let mut session = Session::start(&t);
        session.extend([("name", "Ada"), ("extra", "ignored")]);
        assert_eq!(session.value("extra"), "ignored");
        assert_eq!(session.generate(), "Write to Ada in a friendly tone.");
    }
}
