//! Template and variable records.
//!
//! These mirror the catalog JSON schema one-to-one. Only `template`,
//! `variables[].key` and `variables[].required` matter to the engine; the rest
//! is descriptive metadata for the presentation layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// User-supplied values keyed by variable key. Missing keys read as empty.
pub type Values = HashMap<String, String>;

/// How a variable is collected from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    Textarea,
    /// One of a fixed list of options.
    Select,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
        }
    }
}

/// A single substitution point declared by a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Placeholder name, unique within the template.
    pub key: String,
    /// Display label, used in validation messages.
    pub label: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Allowed values; only meaningful for [`VariableKind::Select`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Variable {
    /// A plain-text variable with no hints or default.
    pub fn text(key: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: VariableKind::Text,
            placeholder: None,
            description: None,
            required,
            default_value: None,
            options: Vec::new(),
        }
    }
}

/// An immutable prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Which AI services the template was written for, e.g. `"ChatGPT, Claude"`.
    #[serde(default)]
    pub ai_model: String,
    /// Raw template text with `{{key}}` placeholders and `{{#if key}}...{{/if}}` blocks.
    pub template: String,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Template {
    /// Minimal template used by tests and ad-hoc callers.
    pub fn new(id: impl Into<String>, template: impl Into<String>, variables: Vec<Variable>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            category: String::new(),
            ai_model: String::new(),
            template: template.into(),
            variables,
            tips: Vec::new(),
        }
    }

    pub fn variable(&self, key: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.key == key)
    }

    pub fn declares(&self, key: &str) -> bool {
        self.variable(key).is_some()
    }

    /// Initial values for a fresh form: each variable's default, or empty.
    pub fn default_values(&self) -> Values {
        self.variables
            .iter()
            .map(|v| (v.key.clone(), v.default_value.clone().unwrap_or_default()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "id": "t",
            "name": "T",
            "category": "General",
            "ai_model": "Claude",
            "template": "{{a}}",
            "variables": [
                {"key": "a", "label": "A", "type": "select", "required": true, "options": ["x", "y"]},
                {"key": "b", "label": "B", "type": "textarea", "required": false, "default_value": "hi"}
            ],
            "tips": ["one"]
        }"#;
        let t: Template = serde_json::from_str(json).unwrap();
        assert_eq!(t.variables[0].kind, VariableKind::Select);
        assert_eq!(t.variables[0].options, vec!["x", "y"]);
        assert_eq!(t.variables[1].kind, VariableKind::Textarea);
        assert_eq!(t.description, "");
        assert_eq!(t.tips, vec!["one"]);
    }

    #[test]
    fn test_default_values_fill_every_key() {
        let mut b = Variable::text("b", "B", false);
        b.default_value = Some("preset".into());
        let t = Template::new("t", "", vec![Variable::text("a", "A", true), b]);
        let values = t.default_values();
        assert_eq!(values.get("a").map(String::as_str), Some(""));
        assert_eq!(values.get("b").map(String::as_str), Some("preset"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"key": "a", "label": "A", "type": "checkbox", "required": true}"#;
        assert!(serde_json::from_str::<Variable>(json).is_err());
    }
}
