//! The template catalog.
//!
//! A [`Catalog`] is loaded once (from the embedded built-in JSON or a user file)
//! and then only read. Loading enforces the structural rules the engine relies
//! on and collects non-fatal [`Diagnostic`]s for everything it merely tolerates.
//!
//! Hard errors:
//! - empty template id, or two templates with the same id
//! - a variable key that is not `[A-Za-z0-9_]+` (it could never be substituted)
//! - two variables in one template with the same key
//! - a `select` variable with no options
//!
//! Diagnostics:
//! - unbalanced `{{#if}}` / `{{/if}}` markers (stripped at generation time)
//! - placeholders or conditionals naming undeclared keys (left verbatim / unwrapped)
//! - declared variables that the template never references
//! - `options` on a non-`select` variable, or a `select` default outside its options

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::engine::{MarkerIssue, PreparedTemplate};
use crate::engine::parser::is_key;
use crate::error::{PromptKitError, Result};
use crate::template::{Template, VariableKind};
use crate::templates::embedded;

/// What a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    Marker(MarkerIssue),
    UndeclaredReference(String),
    UnusedVariable(String),
    OptionsIgnored(String),
    DefaultNotInOptions { key: String, value: String },
}

/// A non-fatal problem found in one template while loading a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub template: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Malformed marker syntax, as opposed to an informational note.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Marker(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.template)?;
        match &self.kind {
            DiagnosticKind::Marker(issue) => write!(f, "{issue}"),
            DiagnosticKind::UndeclaredReference(key) => {
                write!(f, "'{key}' is not a declared variable and will be left as-is")
            }
            DiagnosticKind::UnusedVariable(key) => {
                write!(f, "variable '{key}' is never referenced")
            }
            DiagnosticKind::OptionsIgnored(key) => {
                write!(f, "variable '{key}' has options but is not a select")
            }
            DiagnosticKind::DefaultNotInOptions { key, value } => {
                write!(f, "default '{value}' of '{key}' is not one of its options")
            }
        }
    }
}

/// An ordered, immutable collection of prepared templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<PreparedTemplate>,
    diagnostics: Vec<Diagnostic>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json("built-in catalog", embedded::BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file containing an array of templates.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PromptKitError::CatalogNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&path.display().to_string(), &contents)
    }

    /// Parse a catalog from JSON text. `origin` names the source in errors.
    pub fn from_json(origin: &str, text: &str) -> Result<Self> {
        let templates: Vec<Template> =
            serde_json::from_str(text).map_err(|e| PromptKitError::CatalogParse {
                origin: origin.to_string(),
                source: e,
            })?;
        let catalog = Self::from_templates(templates)?;
        tracing::debug!(
            origin,
            templates = catalog.len(),
            diagnostics = catalog.diagnostics.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_templates(templates: Vec<Template>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut prepared = Vec::with_capacity(templates.len());
        let mut diagnostics = Vec::new();

        for template in templates {
            check_structure(&template)?;
            if !ids.insert(template.id.clone()) {
                return Err(PromptKitError::DuplicateTemplate(template.id));
            }

            let template = PreparedTemplate::new(template);
            for diagnostic in diagnose(&template) {
                if diagnostic.is_malformed() {
                    tracing::warn!("{diagnostic}");
                } else {
                    tracing::debug!("{diagnostic}");
                }
                diagnostics.push(diagnostic);
            }
            prepared.push(template);
        }

        Ok(Self {
            templates: prepared,
            diagnostics,
        })
    }

    pub fn get(&self, id: &str) -> Option<&PreparedTemplate> {
        self.templates.iter().find(|t| t.template().id == id)
    }

    /// Like [`Catalog::get`] but reports unknown ids as an error.
    pub fn require(&self, id: &str) -> Result<&PreparedTemplate> {
        self.get(id)
            .ok_or_else(|| PromptKitError::TemplateNotFound(id.to_string()))
    }

    pub fn templates(&self) -> &[PreparedTemplate] {
        &self.templates
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.templates
            .iter()
            .map(|t| t.template().category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a PreparedTemplate> {
        self.templates
            .iter()
            .filter(move |t| t.template().category == category)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn check_structure(template: &Template) -> Result<()> {
    let invalid = |reason: String| PromptKitError::InvalidTemplate {
        template: template.id.clone(),
        reason,
    };

    if template.id.trim().is_empty() {
        return Err(invalid("template id is empty".into()));
    }

    let mut keys = HashSet::new();
    for variable in &template.variables {
        if !is_key(&variable.key) {
            return Err(invalid(format!(
                "variable key '{}' must only contain letters, digits and '_'",
                variable.key
            )));
        }
        if !keys.insert(variable.key.as_str()) {
            return Err(PromptKitError::DuplicateVariable {
                template: template.id.clone(),
                key: variable.key.clone(),
            });
        }
        if variable.kind == VariableKind::Select && variable.options.is_empty() {
            return Err(invalid(format!(
                "select variable '{}' has no options",
                variable.key
            )));
        }
    }
    Ok(())
}

fn diagnose(prepared: &PreparedTemplate) -> Vec<Diagnostic> {
    let template = prepared.template();
    let mut kinds = Vec::new();

    for issue in prepared.marker_issues() {
        kinds.push(DiagnosticKind::Marker(issue.clone()));
    }

    let referenced = prepared.referenced_keys();
    for key in &referenced {
        if !template.declares(key) {
            kinds.push(DiagnosticKind::UndeclaredReference(key.to_string()));
        }
    }

    for variable in &template.variables {
        if !referenced.contains(&variable.key.as_str()) {
            kinds.push(DiagnosticKind::UnusedVariable(variable.key.clone()));
        }
        match variable.kind {
            VariableKind::Select => {
                if let Some(default) = &variable.default_value {
                    if !default.is_empty() && !variable.options.contains(default) {
                        kinds.push(DiagnosticKind::DefaultNotInOptions {
                            key: variable.key.clone(),
                            value: default.clone(),
                        });
                    }
                }
            }
            VariableKind::Text | VariableKind::Textarea => {
                if !variable.options.is_empty() {
                    kinds.push(DiagnosticKind::OptionsIgnored(variable.key.clone()));
                }
            }
        }
    }

    kinds
        .into_iter()
        .map(|kind| Diagnostic {
            template: template.id.clone(),
            kind,
        })
        .collect()
}
